// ============================================================================
// State Core - Generic Reducer Abstractions
// ============================================================================
//
// This module contains GENERIC, reusable reducer infrastructure
// that works with ANY in-memory aggregate.
//
// Key Principles:
// - No domain-specific code (no Cart, Order, etc.)
// - Generic over aggregate types
// - Commands are typed values, never closures over shared state
//
// ============================================================================

pub mod aggregate;
pub mod event;

// Re-export core types for convenience
pub use aggregate::Aggregate;
pub use event::{Command, DomainEvent};
