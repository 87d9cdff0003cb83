// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// This module contains domain-specific aggregates and business logic.
// - cart/  - the cart aggregate and the store that owns it
// - order/ - the order form and order placement
//
// This layer knows nothing about how the cart is presented.
//
// ============================================================================

pub mod cart;
pub mod order;
