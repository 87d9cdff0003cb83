use std::sync::Arc;

use crate::metrics::Metrics;
use crate::state::{Aggregate, Command, DomainEvent, KeyValueStorage, SnapshotStore};

use super::aggregate::Cart;
use super::commands::CartCommand;
use super::value_objects::{CartLine, ItemId, Price};

// ============================================================================
// Cart Store
// ============================================================================
//
// Orchestrates: Command → Cart → Events → Storage → Subscribers
//
// The store is the only writer of the cart. Every change is written to
// storage before subscribers hear about it, and before the call returns.
//
// ============================================================================

/// Which lines a change touched
#[derive(Debug, Clone, PartialEq)]
pub enum Affected {
    Item(ItemId),
    All,
}

/// Notification sent to subscribers after a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct CartChange {
    pub affected: Affected,
    pub item_count: u64,
    pub total: f64,
}

type Listener = Box<dyn FnMut(&CartChange)>;

pub struct CartStore<S: KeyValueStorage> {
    cart: Cart,
    storage: S,
    snapshots: SnapshotStore<Cart>,
    metrics: Arc<Metrics>,
    listeners: Vec<Listener>,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Open the store, restoring the cart persisted under `key`.
    ///
    /// A missing, unreadable or corrupt slot yields an empty cart.
    pub fn open(storage: S, key: &str, metrics: Arc<Metrics>) -> Self {
        let snapshots: SnapshotStore<Cart> = SnapshotStore::new(key);

        let cart = match snapshots.load(&storage) {
            Ok(Some(cart)) => cart.sanitized(),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(key = key, error = %e, "Failed to load cart, starting empty");
                metrics.record_storage_failure("read");
                Cart::new()
            }
        };

        metrics.set_cart_item_count(cart.item_count());

        tracing::info!(
            key = key,
            lines = cart.len(),
            item_count = cart.item_count(),
            "Cart store opened"
        );

        Self {
            cart,
            storage,
            snapshots,
            metrics,
            listeners: Vec::new(),
        }
    }

    /// Register a callback invoked after every mutation.
    ///
    /// `MenuPage` does not listen here; it routes refreshes from the
    /// `CartChange` that `dispatch` returns. Listeners are for observers
    /// outside the page, such as loggers or sync hooks.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Apply a command. Returns `None` when the cart did not change.
    pub fn dispatch(&mut self, command: CartCommand) -> Option<CartChange> {
        let command_name = command.command_name();

        let events = match self.cart.reduce(&command) {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(command = command_name, error = %e, "Cart command rejected");
                self.metrics.record_command(command_name, false);
                return None;
            }
        };

        if events.is_empty() {
            tracing::debug!(
                command = command_name,
                item_id = ?command.item_id(),
                "Cart command had nothing to change"
            );
            self.metrics.record_command(command_name, false);
            return None;
        }

        self.persist();

        let change = CartChange {
            affected: match command.item_id() {
                Some(id) => Affected::Item(id.clone()),
                None => Affected::All,
            },
            item_count: self.cart.item_count(),
            total: self.cart.total(),
        };

        self.metrics.record_command(command_name, true);
        self.metrics.set_cart_item_count(change.item_count);

        tracing::debug!(
            command = command_name,
            events = ?events.iter().map(DomainEvent::event_type).collect::<Vec<_>>(),
            item_count = change.item_count,
            total = change.total,
            "Cart updated"
        );

        for listener in &mut self.listeners {
            listener(&change);
        }

        Some(change)
    }

    pub fn add_item(
        &mut self,
        id: impl Into<ItemId>,
        name: impl Into<String>,
        price: Price,
    ) -> Option<CartChange> {
        self.dispatch(CartCommand::AddItem {
            id: id.into(),
            name: name.into(),
            price,
        })
    }

    /// Add an item whose price is still in its display-surface text form
    pub fn add_item_raw(
        &mut self,
        id: impl Into<ItemId>,
        name: impl Into<String>,
        raw_price: &str,
    ) -> Option<CartChange> {
        self.add_item(id, name, Price::parse_or_zero(raw_price))
    }

    pub fn increment_item(&mut self, id: impl Into<ItemId>) -> Option<CartChange> {
        self.dispatch(CartCommand::IncrementItem { id: id.into() })
    }

    pub fn decrement_item(&mut self, id: impl Into<ItemId>) -> Option<CartChange> {
        self.dispatch(CartCommand::DecrementItem { id: id.into() })
    }

    pub fn remove_item(&mut self, id: impl Into<ItemId>) -> Option<CartChange> {
        self.dispatch(CartCommand::RemoveItem { id: id.into() })
    }

    pub fn clear(&mut self) -> Option<CartChange> {
        self.dispatch(CartCommand::Clear)
    }

    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    pub fn total(&self) -> f64 {
        self.cart.total()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn line(&self, id: &ItemId) -> Option<&CartLine> {
        self.cart.line(id)
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Tear the store down, handing back its storage backend
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self) {
        if let Err(e) = self.snapshots.save(&mut self.storage, &self.cart) {
            tracing::warn!(
                key = %self.snapshots.key(),
                error = %e,
                "Failed to persist cart, keeping in-memory state"
            );
            self.metrics.record_storage_failure("write");
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
