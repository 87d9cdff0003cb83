use chrono::Utc;
use uuid::Uuid;

use crate::domain::cart::CartStore;
use crate::state::KeyValueStorage;

use super::errors::OrderFormError;
use super::value_objects::{Fulfillment, OrderConfirmation, OrderForm};

// ============================================================================
// Order Placement
// ============================================================================
//
// Validate form → snapshot cart → clear cart.
// Nothing leaves the process; placing an order only resets local state.
//
// ============================================================================

/// Form fields after trimming, known to be present
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedForm {
    pub name: String,
    pub phone: String,
    pub fulfillment: Fulfillment,
    pub address: Option<String>,
}

pub fn validate_form(form: &OrderForm) -> Result<ValidatedForm, OrderFormError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(OrderFormError::MissingName);
    }

    let phone = form.phone.trim();
    if phone.is_empty() {
        return Err(OrderFormError::MissingPhone);
    }

    let address = match form.fulfillment {
        Fulfillment::Delivery => form
            .address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string),
        Fulfillment::Pickup => None,
    };

    Ok(ValidatedForm {
        name: name.to_string(),
        phone: phone.to_string(),
        fulfillment: form.fulfillment,
        address,
    })
}

/// Place the order held in `store`, then clear the cart
pub fn place_order<S: KeyValueStorage>(
    store: &mut CartStore<S>,
    form: &OrderForm,
) -> Result<OrderConfirmation, OrderFormError> {
    let form = validate_form(form)?;

    if store.cart().is_empty() {
        return Err(OrderFormError::EmptyCart);
    }

    let confirmation = OrderConfirmation {
        order_ref: Uuid::new_v4(),
        name: form.name,
        phone: form.phone,
        fulfillment: form.fulfillment,
        address: form.address,
        item_count: store.item_count(),
        total: store.total(),
        placed_at: Utc::now(),
    };

    store.clear();
    store.metrics().record_order_placed();

    tracing::info!(
        order_ref = %confirmation.order_ref,
        item_count = confirmation.item_count,
        total = confirmation.total,
        fulfillment = ?confirmation.fulfillment,
        "✅ Order placed"
    );

    Ok(confirmation)
}

// ============================================================================
// Unit Tests
// ============================================================================
