// ============================================================================
// Cart Domain - Business Logic for the Cart Aggregate
// ============================================================================
//
// This module contains ALL Cart-specific code:
// - Value objects (ItemId, Price, CartLine, PriceFormat)
// - Events (LineOpened, QuantityIncreased, etc.)
// - Commands (AddItem, IncrementItem, etc.)
// - Errors (CartError enum)
// - Aggregate (Cart with business logic)
// - Store (CartStore: persistence and subscribers)
//
// ============================================================================

pub mod value_objects;
pub mod events;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod store;

// Re-export for convenience
pub use value_objects::*;
pub use events::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
pub use store::*;
