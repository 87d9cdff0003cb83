use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::state::Aggregate;
use super::commands::CartCommand;
use super::errors::CartError;
use super::events::*;
use super::value_objects::{CartLine, ItemId, Price};

// ============================================================================
// Cart Aggregate - Domain Logic
// ============================================================================
//
// Serialized as a JSON object keyed by item id:
//   { "a": { "id": "a", "name": "Pizza", "price": 12.5, "qty": 2 } }
// Insertion order is kept for display.
//
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: IndexMap<ItemId, CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&self, id: &ItemId) -> Option<&CartLine> {
        self.lines.get(id)
    }

    pub fn qty(&self, id: &ItemId) -> u32 {
        self.lines.get(id).map_or(0, |line| line.qty)
    }

    /// Lines in insertion order
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across all lines
    pub fn item_count(&self) -> u64 {
        self.lines.values().map(|line| u64::from(line.qty)).sum()
    }

    /// Sum of `price × qty` across all lines, unrounded
    pub fn total(&self) -> f64 {
        self.lines.values().map(CartLine::subtotal).sum()
    }

    /// Drop entries a persisted snapshot should never have contained
    pub fn sanitized(mut self) -> Self {
        let before = self.lines.len();
        self.lines
            .retain(|key, line| line.qty >= 1 && line.price.is_valid() && *key == line.id);

        let dropped = before - self.lines.len();
        if dropped > 0 {
            tracing::warn!(dropped = dropped, "Dropped invalid lines from loaded cart");
        }
        self
    }

    fn line_mut(&mut self, id: &ItemId) -> Result<&mut CartLine, CartError> {
        self.lines
            .get_mut(id)
            .ok_or_else(|| CartError::LineNotFound(id.clone()))
    }

    fn next_qty(line: &CartLine) -> Result<u32, CartError> {
        line.qty
            .checked_add(1)
            .ok_or_else(|| CartError::QuantityOverflow(line.id.clone()))
    }
}

// ============================================================================
// Aggregate Trait Implementation
// ============================================================================

impl Aggregate for Cart {
    type Event = CartEvent;
    type Command = CartCommand;
    type Error = CartError;

    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error> {
        match event {
            CartEvent::LineOpened(e) => {
                if self.lines.contains_key(&e.id) {
                    return Err(CartError::LineAlreadyExists(e.id.clone()));
                }
                self.lines.insert(
                    e.id.clone(),
                    CartLine {
                        id: e.id.clone(),
                        name: e.name.clone(),
                        price: e.price,
                        qty: 0,
                    },
                );
            }
            CartEvent::QuantityIncreased(e) => {
                let line = self.line_mut(&e.id)?;
                line.qty = Self::next_qty(line)?;
            }
            CartEvent::QuantityDecreased(e) => {
                let line = self.line_mut(&e.id)?;
                line.qty = line.qty.saturating_sub(1);
                if line.qty == 0 {
                    self.lines.shift_remove(&e.id);
                }
            }
            CartEvent::LineRemoved(e) => {
                self.lines.shift_remove(&e.id);
            }
            CartEvent::Cleared => {
                self.lines.clear();
            }
        }

        Ok(())
    }

    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::AddItem { id, name, price } => match self.lines.get(id) {
                // Name and price are captured on first add only.
                Some(line) => {
                    Self::next_qty(line)?;
                    Ok(vec![CartEvent::QuantityIncreased(QuantityChanged { id: id.clone() })])
                }
                None => {
                    let price = Price::new(price.amount())?;
                    Ok(vec![
                        CartEvent::LineOpened(LineOpened {
                            id: id.clone(),
                            name: name.clone(),
                            price,
                        }),
                        CartEvent::QuantityIncreased(QuantityChanged { id: id.clone() }),
                    ])
                }
            },

            CartCommand::IncrementItem { id } => match self.lines.get(id) {
                Some(line) => {
                    Self::next_qty(line)?;
                    Ok(vec![CartEvent::QuantityIncreased(QuantityChanged { id: id.clone() })])
                }
                None => Ok(vec![]),
            },

            CartCommand::DecrementItem { id } => {
                if !self.lines.contains_key(id) {
                    return Ok(vec![]);
                }
                Ok(vec![CartEvent::QuantityDecreased(QuantityChanged { id: id.clone() })])
            }

            CartCommand::RemoveItem { id } => {
                if !self.lines.contains_key(id) {
                    return Ok(vec![]);
                }
                Ok(vec![CartEvent::LineRemoved(LineRemoved { id: id.clone() })])
            }

            CartCommand::Clear => Ok(vec![CartEvent::Cleared]),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn add(id: &str, name: &str, price: f64) -> CartCommand {
        CartCommand::AddItem {
            id: ItemId::from(id),
            name: name.to_string(),
            price: Price::new(price).unwrap(),
        }
    }

    fn cart_with(lines: &[(&str, u32, f64)]) -> Cart {
        let mut cart = Cart::new();
        for (id, qty, price) in lines {
            for _ in 0..*qty {
                cart.reduce(&add(id, id, *price)).unwrap();
            }
        }
        cart
    }

    #[test]
    fn test_add_twice_yields_single_line() {
        let mut cart = Cart::new();
        cart.reduce(&add("a", "Pizza", 12.5)).unwrap();
        cart.reduce(&add("a", "Pizza", 12.5)).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.qty(&ItemId::from("a")), 2);
        assert_eq!(cart.total(), 25.0);
    }

    #[test]
    fn test_first_add_emits_open_then_increase() {
        let cart = Cart::new();
        let events = cart.handle_command(&add("a", "Pizza", 12.5)).unwrap();

        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], CartEvent::LineOpened(_)));
        assert!(matches!(events[1], CartEvent::QuantityIncreased(_)));
    }

    #[test]
    fn test_name_and_price_captured_on_first_add() {
        let mut cart = Cart::new();
        cart.reduce(&add("a", "Pizza", 12.5)).unwrap();
        cart.reduce(&add("a", "Renamed", 99.0)).unwrap();

        let line = cart.line(&ItemId::from("a")).unwrap();
        assert_eq!(line.name, "Pizza");
        assert_eq!(line.price.amount(), 12.5);
        assert_eq!(line.qty, 2);
    }

    #[test]
    fn test_count_and_total_of_mixed_cart() {
        let cart = cart_with(&[("a", 2, 5.00), ("b", 1, 3.50)]);
        assert_eq!(cart.item_count(), 3);
        assert!((cart.total() - 13.50).abs() < 1e-9);
    }

    #[test]
    fn test_empty_cart_aggregates() {
        let cart = Cart::new();
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), 0.0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrement_at_one_removes_line_then_noop() {
        let mut cart = cart_with(&[("a", 1, 5.0)]);
        let id = ItemId::from("a");

        cart.reduce(&CartCommand::DecrementItem { id: id.clone() }).unwrap();
        assert!(cart.line(&id).is_none());

        let events = cart.reduce(&CartCommand::DecrementItem { id }).unwrap();
        assert!(events.is_empty());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_increment_missing_line_is_noop() {
        let mut cart = cart_with(&[("a", 1, 5.0)]);
        let before = cart.clone();

        let events = cart
            .reduce(&CartCommand::IncrementItem { id: ItemId::from("zzz") })
            .unwrap();

        assert!(events.is_empty());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_deletes_regardless_of_qty() {
        let mut cart = cart_with(&[("a", 4, 5.0), ("b", 1, 1.0)]);
        cart.reduce(&CartCommand::RemoveItem { id: ItemId::from("a") }).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_remove_missing_line_is_noop() {
        let mut cart = Cart::new();
        let events = cart
            .reduce(&CartCommand::RemoveItem { id: ItemId::from("a") })
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = cart_with(&[("a", 2, 5.0), ("b", 1, 3.5)]);
        cart.reduce(&CartCommand::Clear).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_insertion_order_is_display_order() {
        let mut cart = cart_with(&[("c", 1, 1.0), ("a", 1, 1.0), ("b", 1, 1.0)]);
        cart.reduce(&CartCommand::DecrementItem { id: ItemId::from("a") }).unwrap();

        let ids: Vec<&str> = cart.lines().map(|line| line.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[test]
    fn test_increment_at_limit_is_rejected() {
        let mut cart = Cart::new();
        cart.lines.insert(
            ItemId::from("a"),
            CartLine {
                id: ItemId::from("a"),
                name: "Pizza".to_string(),
                price: Price::ZERO,
                qty: u32::MAX,
            },
        );
        let before = cart.clone();

        let result = cart.reduce(&CartCommand::IncrementItem { id: ItemId::from("a") });
        assert!(matches!(result, Err(CartError::QuantityOverflow(_))));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_serialized_form_is_object_keyed_by_id() {
        let cart = cart_with(&[("a", 2, 5.0)]);
        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "a": { "id": "a", "name": "a", "price": 5.0, "qty": 2 } })
        );
    }

    #[test]
    fn test_sanitized_drops_invalid_lines() {
        let json = r#"{
            "a": { "id": "a", "name": "Pizza", "price": 5.0, "qty": 2 },
            "b": { "id": "b", "name": "Soup", "price": 3.0, "qty": 0 },
            "c": { "id": "c", "name": "Tea", "price": -1.0, "qty": 1 },
            "d": { "id": "x", "name": "Cake", "price": 4.0, "qty": 1 },
            "e": { "id": "e", "name": "Caviar", "price": 1e308, "qty": 2 }
        }"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        let cart = cart.sanitized();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.qty(&ItemId::from("a")), 2);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(u8),
        Inc(u8),
        Dec(u8),
        Remove(u8),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..5).prop_map(Op::Add),
            (0u8..5).prop_map(Op::Inc),
            (0u8..5).prop_map(Op::Dec),
            (0u8..5).prop_map(Op::Remove),
        ]
    }

    fn to_command(op: &Op) -> CartCommand {
        let id = |n: &u8| ItemId::new(format!("item-{n}"));
        match op {
            Op::Add(n) => CartCommand::AddItem {
                id: id(n),
                name: format!("Dish {n}"),
                price: Price::new(f64::from(*n) * 1.25).unwrap(),
            },
            Op::Inc(n) => CartCommand::IncrementItem { id: id(n) },
            Op::Dec(n) => CartCommand::DecrementItem { id: id(n) },
            Op::Remove(n) => CartCommand::RemoveItem { id: id(n) },
        }
    }

    proptest! {
        #[test]
        fn prop_quantities_stay_positive(ops in proptest::collection::vec(op_strategy(), 0..64)) {
            let mut cart = Cart::new();
            for op in &ops {
                cart.reduce(&to_command(op)).unwrap();
            }

            let summed: u64 = cart.lines().map(|line| u64::from(line.qty)).sum();
            prop_assert_eq!(cart.item_count(), summed);
            prop_assert!(cart.lines().all(|line| line.qty >= 1));
        }

        #[test]
        fn prop_snapshot_round_trip(ops in proptest::collection::vec(op_strategy(), 0..64)) {
            let mut cart = Cart::new();
            for op in &ops {
                cart.reduce(&to_command(op)).unwrap();
            }

            let json = serde_json::to_string(&cart).unwrap();
            let restored: Cart = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(&restored, &cart);

            let restored_ids: Vec<&ItemId> = restored.lines().map(|line| &line.id).collect();
            let ids: Vec<&ItemId> = cart.lines().map(|line| &line.id).collect();
            prop_assert_eq!(restored_ids, ids);
        }
    }
}
