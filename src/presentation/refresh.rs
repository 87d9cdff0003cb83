use crate::domain::cart::{Affected, CartChange, ItemId};

/// Presenter refresh instruction produced by a UI command
#[derive(Debug, Clone, PartialEq)]
pub enum Refresh {
    Card(ItemId),
    AllCards,
    CartBar,
    OrderModal,
}

impl Refresh {
    /// Refreshes owed to the grid and the bar after a cart change
    pub fn for_change(change: &CartChange) -> Vec<Refresh> {
        let cards = match &change.affected {
            Affected::Item(id) => Refresh::Card(id.clone()),
            Affected::All => Refresh::AllCards,
        };
        vec![cards, Refresh::CartBar]
    }
}
