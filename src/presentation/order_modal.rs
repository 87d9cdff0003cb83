use uuid::Uuid;

use crate::domain::cart::{Cart, CartStore, ItemId, PriceFormat};
use crate::domain::order::{place_order, Fulfillment, OrderConfirmation, OrderForm};
use crate::state::KeyValueStorage;

// ============================================================================
// Order Modal Presenter
// ============================================================================
//
// closed → order-entry (open)
// order-entry → order-confirmed (valid submit)
// either → closed (close)
// Reopening always lands on order-entry.
//
// ============================================================================

/// One rendered cart line with its controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineView {
    pub id: ItemId,
    pub name: String,
    pub unit_price: String,
    pub qty: u32,
    pub subtotal: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderEntryView {
    /// Placeholder shown instead of the line list and form
    Empty,
    Lines {
        lines: Vec<OrderLineView>,
        total: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationView {
    pub order_ref: Uuid,
    pub name: String,
    pub item_count: u64,
    pub total: String,
    pub fulfillment: Fulfillment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalView {
    Closed,
    OrderEntry(OrderEntryView),
    OrderConfirmed(ConfirmationView),
}

#[derive(Debug, Clone)]
pub struct OrderModalPresenter {
    format: PriceFormat,
    view: ModalView,
    fulfillment: Fulfillment,
}

impl OrderModalPresenter {
    pub fn new(format: PriceFormat) -> Self {
        Self {
            format,
            view: ModalView::Closed,
            fulfillment: Fulfillment::default(),
        }
    }

    pub fn open(&mut self, cart: &Cart) {
        self.view = ModalView::OrderEntry(self.render_entry(cart));
        tracing::debug!(lines = cart.len(), "Order modal opened");
    }

    pub fn close(&mut self) {
        self.view = ModalView::Closed;
    }

    /// Re-render the line list; only the order-entry view follows the cart
    pub fn sync(&mut self, cart: &Cart) {
        if let ModalView::OrderEntry(_) = self.view {
            self.view = ModalView::OrderEntry(self.render_entry(cart));
        }
    }

    pub fn select_fulfillment(&mut self, fulfillment: Fulfillment) {
        self.fulfillment = fulfillment;
    }

    pub fn fulfillment(&self) -> Fulfillment {
        self.fulfillment
    }

    pub fn address_field_visible(&self) -> bool {
        self.fulfillment.needs_address()
    }

    /// Submit the order form.
    ///
    /// Returns `None`, leaving cart and view untouched, unless the modal is in
    /// order-entry and the form and cart allow the order to be placed.
    pub fn submit<S: KeyValueStorage>(
        &mut self,
        store: &mut CartStore<S>,
        form: &OrderForm,
    ) -> Option<OrderConfirmation> {
        if !matches!(self.view, ModalView::OrderEntry(_)) {
            tracing::debug!("Ignoring order submission outside order entry");
            return None;
        }

        match place_order(store, form) {
            Ok(confirmation) => {
                self.view = ModalView::OrderConfirmed(ConfirmationView {
                    order_ref: confirmation.order_ref,
                    name: confirmation.name.clone(),
                    item_count: confirmation.item_count,
                    total: self.format.format(confirmation.total),
                    fulfillment: confirmation.fulfillment,
                });
                Some(confirmation)
            }
            Err(e) => {
                tracing::debug!(reason = %e, "Order submission blocked");
                None
            }
        }
    }

    pub fn view(&self) -> &ModalView {
        &self.view
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.view, ModalView::Closed)
    }

    fn render_entry(&self, cart: &Cart) -> OrderEntryView {
        if cart.is_empty() {
            return OrderEntryView::Empty;
        }

        let lines = cart
            .lines()
            .map(|line| OrderLineView {
                id: line.id.clone(),
                name: line.name.clone(),
                unit_price: self.format.format(line.price.amount()),
                qty: line.qty,
                subtotal: self.format.format(line.subtotal()),
            })
            .collect();

        OrderEntryView::Lines {
            lines,
            total: self.format.format(cart.total()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::Price;
    use crate::metrics::Metrics;
    use crate::state::MemoryStorage;
    use std::sync::Arc;

    fn store() -> CartStore<MemoryStorage> {
        CartStore::open(MemoryStorage::new(), "cc_cart", Arc::new(Metrics::new().unwrap()))
    }

    fn modal() -> OrderModalPresenter {
        OrderModalPresenter::new(PriceFormat::default())
    }

    #[test]
    fn test_starts_closed() {
        let modal = modal();
        assert_eq!(modal.view(), &ModalView::Closed);
        assert!(!modal.is_open());
    }

    #[test]
    fn test_open_empty_cart_shows_placeholder() {
        let mut modal = modal();
        modal.open(&Cart::new());
        assert_eq!(modal.view(), &ModalView::OrderEntry(OrderEntryView::Empty));
    }

    #[test]
    fn test_open_renders_lines_in_order() {
        let mut store = store();
        store.add_item("b", "Soup", Price::new(3.5).unwrap());
        store.add_item("a", "Pizza", Price::new(5.0).unwrap());
        store.add_item("a", "Pizza", Price::new(5.0).unwrap());

        let mut modal = modal();
        modal.open(store.cart());

        let ModalView::OrderEntry(OrderEntryView::Lines { lines, total }) = modal.view() else {
            panic!("expected rendered lines, got {:?}", modal.view());
        };

        assert_eq!(total, "$13.50");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].name, "Soup");
        assert_eq!(
            lines[1],
            OrderLineView {
                id: ItemId::from("a"),
                name: "Pizza".to_string(),
                unit_price: "$5.00".to_string(),
                qty: 2,
                subtotal: "$10.00".to_string(),
            }
        );
    }

    #[test]
    fn test_submit_moves_to_confirmation_and_clears_cart() {
        let mut store = store();
        store.add_item("a", "Pizza", Price::new(5.0).unwrap());
        store.add_item("a", "Pizza", Price::new(5.0).unwrap());

        let mut modal = modal();
        modal.open(store.cart());
        let confirmation = modal.submit(&mut store, &OrderForm::new("Ada", "555-0100"));

        assert!(confirmation.is_some());
        assert_eq!(store.item_count(), 0);

        let ModalView::OrderConfirmed(view) = modal.view() else {
            panic!("expected confirmation, got {:?}", modal.view());
        };
        assert_eq!(view.name, "Ada");
        assert_eq!(view.item_count, 2);
        assert_eq!(view.total, "$10.00");
    }

    #[test]
    fn test_submit_with_empty_name_changes_nothing() {
        let mut store = store();
        store.add_item("a", "Pizza", Price::new(5.0).unwrap());

        let mut modal = modal();
        modal.open(store.cart());
        let before = modal.view().clone();

        assert!(modal.submit(&mut store, &OrderForm::new("", "555-0100")).is_none());
        assert_eq!(modal.view(), &before);
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn test_submit_while_closed_is_ignored() {
        let mut store = store();
        store.add_item("a", "Pizza", Price::new(5.0).unwrap());

        let mut modal = modal();
        assert!(modal.submit(&mut store, &OrderForm::new("Ada", "555-0100")).is_none());
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn test_reopen_after_confirmation_resets_to_entry() {
        let mut store = store();
        store.add_item("a", "Pizza", Price::new(5.0).unwrap());

        let mut modal = modal();
        modal.open(store.cart());
        modal.submit(&mut store, &OrderForm::new("Ada", "555-0100"));
        modal.close();
        assert!(!modal.is_open());

        modal.open(store.cart());
        assert_eq!(modal.view(), &ModalView::OrderEntry(OrderEntryView::Empty));
    }

    #[test]
    fn test_sync_does_not_leave_confirmation() {
        let mut store = store();
        store.add_item("a", "Pizza", Price::new(5.0).unwrap());

        let mut modal = modal();
        modal.open(store.cart());
        modal.submit(&mut store, &OrderForm::new("Ada", "555-0100"));
        modal.sync(store.cart());

        assert!(matches!(modal.view(), ModalView::OrderConfirmed(_)));
    }

    #[test]
    fn test_sync_while_closed_stays_closed() {
        let mut modal = modal();
        modal.sync(&Cart::new());
        assert_eq!(modal.view(), &ModalView::Closed);
    }

    #[test]
    fn test_close_keeps_cart() {
        let mut store = store();
        store.add_item("a", "Pizza", Price::new(5.0).unwrap());

        let mut modal = modal();
        modal.open(store.cart());
        modal.close();

        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn test_delivery_toggle_controls_address_field() {
        let mut modal = modal();
        assert!(!modal.address_field_visible());

        modal.select_fulfillment(Fulfillment::Delivery);
        assert!(modal.address_field_visible());

        modal.select_fulfillment(Fulfillment::Pickup);
        assert!(!modal.address_field_visible());
    }
}
