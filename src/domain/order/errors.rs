// ============================================================================
// Order Submission Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderFormError {
    #[error("Name is required")]
    MissingName,

    #[error("Phone number is required")]
    MissingPhone,

    #[error("Cannot place an order with an empty cart")]
    EmptyCart,
}
