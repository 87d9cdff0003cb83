use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::CartError;

// ============================================================================
// Cart Value Objects
// ============================================================================

/// Stable identifier of a menu item (the key of a cart line)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Non-negative unit price, capped so line subtotals and cart totals stay finite
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    pub const ZERO: Price = Price(0.0);

    /// Largest accepted unit price
    pub const MAX: Price = Price(1_000_000.0);

    pub fn new(amount: f64) -> Result<Self, CartError> {
        if Self(amount).is_valid() {
            Ok(Self(amount))
        } else {
            Err(CartError::InvalidPrice(amount.to_string()))
        }
    }

    /// Parse a price as written on a menu item surface
    pub fn parse(raw: &str) -> Result<Self, CartError> {
        let amount: f64 = raw
            .trim()
            .parse()
            .map_err(|_| CartError::InvalidPrice(raw.to_string()))?;
        Self::new(amount).map_err(|_| CartError::InvalidPrice(raw.to_string()))
    }

    /// Parse a price, coercing anything unusable to zero
    pub fn parse_or_zero(raw: &str) -> Self {
        match Self::parse(raw) {
            Ok(price) => price,
            Err(e) => {
                tracing::warn!(raw_price = raw, error = %e, "Coercing unusable price to zero");
                Self::ZERO
            }
        }
    }

    pub fn amount(self) -> f64 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 >= 0.0 && self.0 <= Self::MAX.0
    }
}

/// One distinct orderable item currently in the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ItemId,
    pub name: String,
    pub price: Price,
    pub qty: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        self.price.amount() * f64::from(self.qty)
    }
}

/// Display formatting for money amounts (`$12.50`)
#[derive(Debug, Clone, PartialEq)]
pub struct PriceFormat {
    symbol: String,
}

impl PriceFormat {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self { symbol: symbol.into() }
    }

    pub fn format(&self, amount: f64) -> String {
        format!("{}{:.2}", self.symbol, amount)
    }
}

impl Default for PriceFormat {
    fn default() -> Self {
        Self::new("$")
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
