// ============================================================================
// Order Domain - Order Form and Placement
// ============================================================================
//
// - Value objects (Fulfillment, OrderForm, OrderConfirmation)
// - Errors (OrderFormError enum)
// - Placement (validate the form, snapshot and clear the cart)
//
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod placement;

// Re-export for convenience
pub use value_objects::*;
pub use errors::*;
pub use placement::*;
