use crate::state::DomainEvent;
use super::value_objects::{ItemId, Price};

// ============================================================================
// Cart Events - Facts produced by the cart reducer
// ============================================================================

/// Cart Event - Union type for all cart events
#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    LineOpened(LineOpened),
    QuantityIncreased(QuantityChanged),
    QuantityDecreased(QuantityChanged),
    LineRemoved(LineRemoved),
    Cleared,
}

impl DomainEvent for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::LineOpened(_) => "LineOpened",
            CartEvent::QuantityIncreased(_) => "QuantityIncreased",
            CartEvent::QuantityDecreased(_) => "QuantityDecreased",
            CartEvent::LineRemoved(_) => "LineRemoved",
            CartEvent::Cleared => "Cleared",
        }
    }
}

// ============================================================================
// Individual Event Types
// ============================================================================

/// Line Opened - a new line starts at quantity zero with name and price
/// captured from the menu item
#[derive(Debug, Clone, PartialEq)]
pub struct LineOpened {
    pub id: ItemId,
    pub name: String,
    pub price: Price,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuantityChanged {
    pub id: ItemId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineRemoved {
    pub id: ItemId,
}
