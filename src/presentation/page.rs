use indexmap::IndexMap;

use crate::domain::cart::{CartChange, CartStore, ItemId, PriceFormat};
use crate::domain::order::{Fulfillment, OrderConfirmation, OrderForm};
use crate::state::KeyValueStorage;

use super::card::{CardPresenter, MenuItemHandle};
use super::cart_bar::CartBarPresenter;
use super::order_modal::OrderModalPresenter;
use super::refresh::Refresh;

// ============================================================================
// Menu Page - UI command dispatch
// ============================================================================
//
// Owns the cart store and every presenter. Each user interaction arrives as
// a typed command; the page mutates the store and then applies the refresh
// instructions that mutation calls for.
//
// ============================================================================

/// A user interaction on the menu page
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    /// "Add to order" on a menu card
    AddToOrder { id: ItemId },
    CardIncrement { id: ItemId },
    CardDecrement { id: ItemId },
    ModalIncrement { id: ItemId },
    ModalDecrement { id: ItemId },
    ModalRemove { id: ItemId },
    OpenOrder,
    /// Close button, overlay click, or confirmation dismissal
    CloseOrder,
    SelectFulfillment(Fulfillment),
    PlaceOrder {
        name: String,
        phone: String,
        address: Option<String>,
    },
}

pub struct MenuPage<S: KeyValueStorage> {
    store: CartStore<S>,
    cards: IndexMap<ItemId, CardPresenter>,
    cart_bar: CartBarPresenter,
    modal: OrderModalPresenter,
    last_confirmation: Option<OrderConfirmation>,
}

impl<S: KeyValueStorage> MenuPage<S> {
    /// Build the page and bring every presenter in line with the restored cart
    pub fn new(store: CartStore<S>, items: Vec<MenuItemHandle>, format: PriceFormat) -> Self {
        let cards = items
            .into_iter()
            .map(|handle| (handle.id.clone(), CardPresenter::new(handle)))
            .collect();

        let mut page = Self {
            store,
            cards,
            cart_bar: CartBarPresenter::new(format.clone()),
            modal: OrderModalPresenter::new(format),
            last_confirmation: None,
        };

        page.apply(&[Refresh::AllCards, Refresh::CartBar]);
        page
    }

    /// Handle one interaction; returns the refreshes that were applied
    pub fn handle(&mut self, command: UiCommand) -> Vec<Refresh> {
        tracing::debug!(command = ?command, "Handling UI command");

        let refreshes = match command {
            UiCommand::AddToOrder { id } => {
                let Some(handle) = self.cards.get(&id).map(|card| card.handle().clone()) else {
                    tracing::warn!(item_id = %id, "Add requested for an item with no card");
                    return Vec::new();
                };
                let change = self.store.add_item_raw(handle.id, handle.name, &handle.raw_price);
                Self::refreshes_for(change)
            }
            UiCommand::CardIncrement { id } => Self::refreshes_for(self.store.increment_item(id)),
            UiCommand::CardDecrement { id } => Self::refreshes_for(self.store.decrement_item(id)),
            UiCommand::ModalIncrement { id } => {
                Self::with_modal(Self::refreshes_for(self.store.increment_item(id)))
            }
            UiCommand::ModalDecrement { id } => {
                Self::with_modal(Self::refreshes_for(self.store.decrement_item(id)))
            }
            UiCommand::ModalRemove { id } => {
                Self::with_modal(Self::refreshes_for(self.store.remove_item(id)))
            }
            UiCommand::OpenOrder => {
                self.modal.open(self.store.cart());
                Vec::new()
            }
            UiCommand::CloseOrder => {
                self.modal.close();
                Vec::new()
            }
            UiCommand::SelectFulfillment(fulfillment) => {
                self.modal.select_fulfillment(fulfillment);
                Vec::new()
            }
            UiCommand::PlaceOrder { name, phone, address } => {
                let form = OrderForm {
                    name,
                    phone,
                    fulfillment: self.modal.fulfillment(),
                    address,
                };
                match self.modal.submit(&mut self.store, &form) {
                    Some(confirmation) => {
                        self.last_confirmation = Some(confirmation);
                        vec![Refresh::AllCards, Refresh::CartBar]
                    }
                    None => Vec::new(),
                }
            }
        };

        self.apply(&refreshes);
        refreshes
    }

    pub fn apply(&mut self, refreshes: &[Refresh]) {
        let cart = self.store.cart();
        for refresh in refreshes {
            match refresh {
                Refresh::Card(id) => {
                    if let Some(card) = self.cards.get_mut(id) {
                        card.sync(cart);
                    }
                }
                Refresh::AllCards => {
                    for card in self.cards.values_mut() {
                        card.sync(cart);
                    }
                }
                Refresh::CartBar => self.cart_bar.sync(cart),
                Refresh::OrderModal => self.modal.sync(cart),
            }
        }
    }

    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    pub fn card(&self, id: &ItemId) -> Option<&CardPresenter> {
        self.cards.get(id)
    }

    pub fn cards(&self) -> impl Iterator<Item = &CardPresenter> {
        self.cards.values()
    }

    pub fn cart_bar(&self) -> &CartBarPresenter {
        &self.cart_bar
    }

    pub fn modal(&self) -> &OrderModalPresenter {
        &self.modal
    }

    pub fn last_confirmation(&self) -> Option<&OrderConfirmation> {
        self.last_confirmation.as_ref()
    }

    /// Tear the page down, handing back its store
    pub fn into_store(self) -> CartStore<S> {
        self.store
    }

    fn refreshes_for(change: Option<CartChange>) -> Vec<Refresh> {
        change.map(|c| Refresh::for_change(&c)).unwrap_or_default()
    }

    fn with_modal(mut refreshes: Vec<Refresh>) -> Vec<Refresh> {
        refreshes.push(Refresh::OrderModal);
        refreshes
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
