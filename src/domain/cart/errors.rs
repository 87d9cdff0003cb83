use super::value_objects::ItemId;

// ============================================================================
// Cart Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CartError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Quantity limit reached for item: {0}")]
    QuantityOverflow(ItemId),

    #[error("Cart line not found: {0}")]
    LineNotFound(ItemId),

    #[error("Cart line already exists: {0}")]
    LineAlreadyExists(ItemId),
}
