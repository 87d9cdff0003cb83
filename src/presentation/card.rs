use crate::domain::cart::{Cart, ItemId};

// ============================================================================
// Card Presenter - one menu item card
// ============================================================================

/// The item data a menu card carries, resolved once when the card is built
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemHandle {
    pub id: ItemId,
    pub name: String,
    pub raw_price: String,
}

impl MenuItemHandle {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, raw_price: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            raw_price: raw_price.into(),
        }
    }
}

/// What the card shows: the add button, or the quantity stepper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardView {
    AddButton,
    Stepper { qty: u32 },
}

#[derive(Debug, Clone)]
pub struct CardPresenter {
    handle: MenuItemHandle,
    view: CardView,
}

impl CardPresenter {
    pub fn new(handle: MenuItemHandle) -> Self {
        Self {
            handle,
            view: CardView::AddButton,
        }
    }

    /// Full resync from the cart; safe to call any number of times
    pub fn sync(&mut self, cart: &Cart) {
        self.view = match cart.qty(&self.handle.id) {
            0 => CardView::AddButton,
            qty => CardView::Stepper { qty },
        };
    }

    pub fn id(&self) -> &ItemId {
        &self.handle.id
    }

    pub fn handle(&self) -> &MenuItemHandle {
        &self.handle
    }

    pub fn view(&self) -> CardView {
        self.view
    }
}
