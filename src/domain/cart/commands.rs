use crate::state::Command;
use super::value_objects::{ItemId, Price};

// ============================================================================
// Cart Commands - Represent user intent
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum CartCommand {
    AddItem {
        id: ItemId,
        name: String,
        price: Price,
    },
    IncrementItem {
        id: ItemId,
    },
    DecrementItem {
        id: ItemId,
    },
    RemoveItem {
        id: ItemId,
    },
    Clear,
}

impl CartCommand {
    /// The single line this command targets, if any
    pub fn item_id(&self) -> Option<&ItemId> {
        match self {
            CartCommand::AddItem { id, .. }
            | CartCommand::IncrementItem { id }
            | CartCommand::DecrementItem { id }
            | CartCommand::RemoveItem { id } => Some(id),
            CartCommand::Clear => None,
        }
    }
}

impl Command for CartCommand {
    fn command_name(&self) -> &'static str {
        match self {
            CartCommand::AddItem { .. } => "add_item",
            CartCommand::IncrementItem { .. } => "increment_item",
            CartCommand::DecrementItem { .. } => "decrement_item",
            CartCommand::RemoveItem { .. } => "remove_item",
            CartCommand::Clear => "clear",
        }
    }
}
