//! Cart store properties exercised through the public core API.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use proptest::sample::Index;
use rust_decimal::Decimal;
use taharluxe_core::cart::{CartAction, CartLineItem, CartState, CartStore, LineKey, reduce};

// =============================================================================
// Strategies
// =============================================================================

/// Keys drawn from a small pool so that merges and hits are frequent.
/// The size pool includes `""` to keep it distinct from "no size".
fn key_strategy() -> impl Strategy<Value = LineKey> {
    (
        prop::sample::select(vec!["1", "2", "3"]),
        prop::option::of(prop::sample::select(vec!["", "M", "L"])),
        prop::option::of(Just("black")),
    )
        .prop_map(|(id, size, color)| LineKey::new(id, size, color))
}

fn item_strategy() -> impl Strategy<Value = CartLineItem> {
    (key_strategy(), 1u32..=5, "[A-Z][a-z]{0,10}", 1i64..100_000, "/img/[a-z]{1,8}\\.jpg")
        .prop_map(|(key, quantity, name, cents, image)| CartLineItem {
            product_id: key.product_id,
            name,
            unit_price: Decimal::new(cents, 2),
            image,
            quantity,
            selected_size: key.selected_size,
            selected_color: key.selected_color,
        })
}

fn action_strategy() -> impl Strategy<Value = CartAction> {
    prop_oneof![
        4 => item_strategy().prop_map(CartAction::AddItem),
        1 => key_strategy().prop_map(CartAction::RemoveItem),
        2 => (key_strategy(), 0u32..10)
            .prop_map(|(key, quantity)| CartAction::UpdateQuantity { key, quantity }),
        1 => Just(CartAction::ClearCart),
        1 => Just(CartAction::OpenCart),
        1 => Just(CartAction::CloseCart),
        1 => Just(CartAction::ToggleCart),
    ]
}

fn actions_strategy() -> impl Strategy<Value = Vec<CartAction>> {
    prop::collection::vec(action_strategy(), 0..60)
}

/// State reached by applying `actions` to an empty cart.
fn state_after(actions: Vec<CartAction>) -> CartState {
    let mut state = CartState::default();
    for action in actions {
        reduce(&mut state, action);
    }
    state
}

fn keys(state: &CartState) -> Vec<LineKey> {
    state.items.iter().map(CartLineItem::key).collect()
}

const fn is_item_action(action: &CartAction) -> bool {
    matches!(
        action,
        CartAction::AddItem(_) | CartAction::RemoveItem(_) | CartAction::UpdateQuantity { .. }
    )
}

const fn is_visibility_action(action: &CartAction) -> bool {
    matches!(
        action,
        CartAction::OpenCart | CartAction::CloseCart | CartAction::ToggleCart
    )
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn prop_line_keys_stay_unique(actions in actions_strategy()) {
        let mut state = CartState::default();
        for action in actions {
            reduce(&mut state, action);
            let keys = keys(&state);
            let unique: HashSet<_> = keys.iter().collect();
            prop_assert_eq!(unique.len(), keys.len(), "duplicate line in {:?}", keys);
        }
    }

    #[test]
    fn prop_items_and_visibility_are_independent(actions in actions_strategy()) {
        let mut state = CartState::default();
        for action in actions {
            let before = state.clone();
            let item_action = is_item_action(&action);
            let visibility_action = is_visibility_action(&action);
            reduce(&mut state, action);

            if item_action {
                prop_assert_eq!(state.is_open, before.is_open);
            }
            if visibility_action {
                prop_assert_eq!(&state.items, &before.items);
            }
        }
    }

    #[test]
    fn prop_item_count_is_sum_of_quantities(actions in actions_strategy()) {
        let mut state = CartState::default();
        for action in actions {
            let before = state.item_count();
            let added = match &action {
                CartAction::AddItem(item) => Some(u64::from(item.quantity)),
                _ => None,
            };
            reduce(&mut state, action);

            let sum: u64 = state.items.iter().map(|line| u64::from(line.quantity)).sum();
            prop_assert_eq!(state.item_count(), sum);
            if let Some(added) = added {
                prop_assert_eq!(state.item_count(), before + added);
            }
        }
    }

    #[test]
    fn prop_merge_add_keeps_first_snapshot(
        actions in actions_strategy(),
        item in item_strategy(),
    ) {
        let mut state = state_after(actions);
        let before = state.clone();
        let key = item.key();
        let existing = before.items.iter().position(|line| line.matches(&key));

        reduce(&mut state, CartAction::AddItem(item.clone()));

        match existing {
            Some(index) => {
                let old = &before.items[index];
                let merged = &state.items[index];
                prop_assert_eq!(state.items.len(), before.items.len());
                prop_assert_eq!(&merged.name, &old.name);
                prop_assert_eq!(merged.unit_price, old.unit_price);
                prop_assert_eq!(&merged.image, &old.image);
                prop_assert_eq!(merged.quantity, old.quantity + item.quantity);
            }
            None => {
                prop_assert_eq!(state.items.len(), before.items.len() + 1);
                prop_assert_eq!(state.items.last(), Some(&item));
            }
        }
        let prefix = keys(&state)[..before.items.len()].to_vec();
        prop_assert_eq!(prefix, keys(&before));
    }

    #[test]
    fn prop_update_quantity_keeps_position(
        actions in actions_strategy(),
        pick in any::<Index>(),
        quantity in 0u32..20,
    ) {
        let mut state = state_after(actions);
        prop_assume!(!state.items.is_empty());
        let before = state.clone();
        let index = pick.index(before.items.len());
        let key = before.items[index].key();

        reduce(&mut state, CartAction::UpdateQuantity { key, quantity });

        prop_assert_eq!(keys(&state), keys(&before));
        prop_assert_eq!(state.items[index].quantity, quantity);
        for (i, (after, prior)) in state.items.iter().zip(&before.items).enumerate() {
            if i != index {
                prop_assert_eq!(after, prior);
            }
        }
    }

    #[test]
    fn prop_missing_key_changes_nothing(
        actions in actions_strategy(),
        key in key_strategy(),
        quantity in 0u32..20,
    ) {
        let mut state = state_after(actions);
        prop_assume!(state.line(&key).is_none());
        let before = state.clone();

        reduce(&mut state, CartAction::RemoveItem(key.clone()));
        prop_assert_eq!(&state, &before);

        reduce(&mut state, CartAction::UpdateQuantity { key, quantity });
        prop_assert_eq!(&state, &before);
    }

    #[test]
    fn prop_store_notifies_once_per_dispatch(actions in actions_strategy()) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut store = CartStore::new();
        store.subscribe(move |state| sink.lock().unwrap().push(state.clone()));

        let mut expected = CartState::default();
        let mut snapshots = Vec::new();
        for action in actions {
            reduce(&mut expected, action.clone());
            snapshots.push(expected.clone());
            store.dispatch(action);
        }

        let seen = seen.lock().unwrap().clone();
        prop_assert_eq!(seen, snapshots);
        prop_assert_eq!(store.state(), &expected);
    }
}

// =============================================================================
// Examples
// =============================================================================

#[test]
fn test_empty_size_is_not_no_size() {
    let mut store = CartStore::new();
    store.add_item(CartLineItem::new("1", "Shirt", Decimal::from(10), "/a.jpg", 1));
    store.add_item(CartLineItem::new("1", "Shirt", Decimal::from(10), "/a.jpg", 1).with_size(""));
    assert_eq!(store.items().len(), 2);

    store.remove_item("1", Some(""), None);
    assert_eq!(keys(store.state()), vec![LineKey::new("1", None, None)]);
}

#[test]
fn test_state_survives_session_serialization() {
    let mut store = CartStore::new();
    store.add_item(
        CartLineItem::new("1", "Shirt", Decimal::new(5999, 2), "/a.jpg", 2)
            .with_size("")
            .with_color("white"),
    );
    store.add_item(CartLineItem::new("2", "Skirt", Decimal::new(7900, 2), "/b.jpg", 1));
    store.open_cart();

    let json = serde_json::to_string(store.state()).unwrap();
    let restored: CartState = serde_json::from_str(&json).unwrap();
    assert_eq!(&restored, store.state());

    // The restored store keeps merging into the same lines.
    let mut resumed = CartStore::from_state(restored);
    resumed.add_item(
        CartLineItem::new("1", "Renamed", Decimal::ONE, "/x.jpg", 1)
            .with_size("")
            .with_color("white"),
    );
    assert_eq!(resumed.items().len(), 2);
    assert_eq!(resumed.items()[0].quantity, 3);
    assert_eq!(resumed.items()[0].name, "Shirt");
    assert_eq!(resumed.subtotal(), Decimal::new(25897, 2));
}

#[test]
fn test_subscribers_see_every_dispatch() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut store = CartStore::new();
    let sink = Arc::clone(&seen);
    store.subscribe(move |state| sink.lock().unwrap().push(state.item_count()));

    store.add_item(CartLineItem::new("1", "Shirt", Decimal::from(10), "/a.jpg", 2));
    store.remove_item("9", None, None);
    store.update_quantity("1", 5, None, None);
    store.clear_cart();

    assert_eq!(*seen.lock().unwrap(), vec![2, 2, 5, 0]);
}
