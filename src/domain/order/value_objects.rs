use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Order Value Objects
// ============================================================================

/// How the customer receives the order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fulfillment {
    #[default]
    Pickup,
    Delivery,
}

impl Fulfillment {
    /// Whether the delivery-address field applies
    pub fn needs_address(self) -> bool {
        matches!(self, Fulfillment::Delivery)
    }
}

/// Fields of the order form as typed by the customer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderForm {
    pub name: String,
    pub phone: String,
    pub fulfillment: Fulfillment,
    pub address: Option<String>,
}

impl OrderForm {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            ..Self::default()
        }
    }

    pub fn with_delivery(mut self, address: impl Into<String>) -> Self {
        self.fulfillment = Fulfillment::Delivery;
        self.address = Some(address.into());
        self
    }
}

/// Snapshot of a placed order, captured before the cart is cleared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_ref: Uuid,
    pub name: String,
    pub phone: String,
    pub fulfillment: Fulfillment,
    pub address: Option<String>,
    pub item_count: u64,
    pub total: f64,
    pub placed_at: DateTime<Utc>,
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fulfillment_is_pickup() {
        assert_eq!(Fulfillment::default(), Fulfillment::Pickup);
        assert!(!Fulfillment::Pickup.needs_address());
        assert!(Fulfillment::Delivery.needs_address());
    }

    #[test]
    fn test_form_with_delivery() {
        let form = OrderForm::new("Ada", "555-0100").with_delivery("1 Main St");
        assert_eq!(form.fulfillment, Fulfillment::Delivery);
        assert_eq!(form.address.as_deref(), Some("1 Main St"));
    }

    #[test]
    fn test_fulfillment_serialization() {
        assert_eq!(serde_json::to_string(&Fulfillment::Delivery).unwrap(), "\"delivery\"");
        let parsed: Fulfillment = serde_json::from_str("\"pickup\"").unwrap();
        assert_eq!(parsed, Fulfillment::Pickup);
    }
}
