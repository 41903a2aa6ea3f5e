// tests/cart_store_tests.rs
mod common;

use common::*;
use serial_test::serial;
use stockcart::{CartError, CartItemId, Money, ProductId};

#[tokio::test]
#[serial]
async fn test_worked_example_add_update_reject_remove() {
  setup_tracing();
  let inventory = ScriptedInventory::with_stock(&[("p1", 5)]);
  let storage = memory_storage();
  let store = open_store(storage.clone(), inventory.clone());
  assert!(store.is_empty());

  let p1 = product("p1", 1000, 5);
  let item = store.add_item(&p1, 2).await.unwrap();
  assert_eq!(store.items().len(), 1);
  assert_eq!(item.quantity, 2);
  assert_eq!(item.subtotal(), Money::from_cents(2000));

  let item = store.update_quantity(item.id, 3).await.unwrap().unwrap();
  assert_eq!(item.quantity, 3);
  assert_eq!(item.subtotal(), Money::from_cents(3000));

  let err = store.update_quantity(item.id, 6).await.unwrap_err();
  match err {
    CartError::InsufficientStock { requested, available, .. } => {
      assert_eq!(requested, 6);
      assert_eq!(available, 5);
    }
    other => panic!("Expected InsufficientStock, got {:?}", other),
  }
  assert_eq!(store.item(item.id).unwrap().quantity, 3);
  // The rejected increase never reached the inventory.
  assert_eq!(inventory.calls().len(), 2);

  inventory.fail_restore(true);
  let removed = store.remove_item(item.id).await.unwrap();
  assert_eq!(removed.quantity, 3);
  assert!(store.is_empty());
  assert!(stored_items(storage).is_empty());
}

#[tokio::test]
#[serial]
async fn test_add_beyond_stock_changes_nothing_and_calls_nothing() {
  setup_tracing();
  let inventory = ScriptedInventory::with_stock(&[("p1", 5)]);
  let storage = memory_storage();
  let store = open_store(storage.clone(), inventory.clone());

  let err = store.add_item(&product("p1", 1000, 5), 6).await.unwrap_err();
  assert!(matches!(err, CartError::InsufficientStock { requested: 6, available: 5, .. }));
  assert!(err.is_validation());
  assert!(store.is_empty());
  assert!(inventory.calls().is_empty());
  assert!(!storage.contains_key("cart_u1"));
}

#[tokio::test]
#[serial]
async fn test_non_positive_quantities_are_rejected_locally() {
  setup_tracing();
  let inventory = ScriptedInventory::with_stock(&[("p1", 5)]);
  let store = open_store(memory_storage(), inventory.clone());

  for quantity in [0, -1, i64::MIN] {
    let err = store.add_item(&product("p1", 1000, 5), quantity).await.unwrap_err();
    assert!(matches!(err, CartError::InvalidQuantity { .. }), "quantity {}", quantity);
  }
  assert!(store.is_empty());
  assert!(inventory.calls().is_empty());
}

#[tokio::test]
#[serial]
async fn test_re_adding_a_product_grows_its_line() {
  setup_tracing();
  let inventory = ScriptedInventory::with_stock(&[("p1", 10)]);
  let store = open_store(memory_storage(), inventory.clone());

  let first = store.add_item(&product("p1", 1000, 10), 2).await.unwrap();
  // The refreshed projection carries a new price and the reduced stock.
  let second = store.add_item(&product("p1", 1200, 8), 3).await.unwrap();

  assert_eq!(first.id, second.id);
  assert_eq!(second.quantity, 5);
  assert_eq!(second.unit_price, Money::from_cents(1200));
  assert_eq!(store.items().len(), 1);
  assert_eq!(inventory.stock_of("p1"), Some(5));
  assert_eq!(
    inventory.calls(),
    vec![(ProductId::from("p1"), -2), (ProductId::from("p1"), -3)]
  );
}

#[tokio::test]
#[serial]
async fn test_line_invariants_hold_after_every_operation() {
  setup_tracing();
  let inventory = ScriptedInventory::with_stock(&[("p1", 20), ("p2", 20)]);
  let store = open_store(memory_storage(), inventory.clone());

  let a = store.add_item(&product("p1", 199, 20), 3).await.unwrap();
  assert_line_invariants(&store);
  let b = store.add_item(&product("p2", 1050, 20), 1).await.unwrap();
  assert_line_invariants(&store);
  store.update_quantity(a.id, 7).await.unwrap();
  assert_line_invariants(&store);
  store.update_quantity(b.id, 4).await.unwrap();
  assert_line_invariants(&store);
  store.update_quantity(a.id, 2).await.unwrap();
  assert_line_invariants(&store);

  assert_eq!(store.item_count(), 6);
  assert_eq!(store.total_price(), Money::from_cents(2 * 199 + 4 * 1050));

  store.remove_item(b.id).await.unwrap();
  assert_line_invariants(&store);
  assert_eq!(store.item_count(), 2);
  assert_eq!(store.total_price(), Money::from_cents(398));
}

#[tokio::test]
#[serial]
async fn test_update_to_zero_removes_and_restores() {
  setup_tracing();
  let inventory = ScriptedInventory::with_stock(&[("p1", 5)]);
  let store = open_store(memory_storage(), inventory.clone());

  let item = store.add_item(&product("p1", 500, 5), 4).await.unwrap();
  assert_eq!(inventory.stock_of("p1"), Some(1));

  let outcome = store.update_quantity(item.id, 0).await.unwrap();
  assert!(outcome.is_none());
  assert!(store.is_empty());
  assert_eq!(inventory.stock_of("p1"), Some(5));
  assert_eq!(inventory.calls().last(), Some(&(ProductId::from("p1"), 4)));
}

#[tokio::test]
#[serial]
async fn test_unknown_item_and_unchanged_quantity() {
  setup_tracing();
  let inventory = ScriptedInventory::with_stock(&[("p1", 5)]);
  let store = open_store(memory_storage(), inventory.clone());

  let missing = CartItemId::new();
  assert!(matches!(
    store.update_quantity(missing, 2).await,
    Err(CartError::ItemNotFound { .. })
  ));
  assert!(matches!(
    store.remove_item(missing).await,
    Err(CartError::ItemNotFound { .. })
  ));

  let item = store.add_item(&product("p1", 500, 5), 2).await.unwrap();
  let calls_before = inventory.calls().len();
  let same = store.update_quantity(item.id, 2).await.unwrap().unwrap();
  assert_eq!(same.quantity, 2);
  assert_eq!(inventory.calls().len(), calls_before);
}

#[tokio::test]
#[serial]
async fn test_decrease_returns_units_to_stock() {
  setup_tracing();
  let inventory = ScriptedInventory::with_stock(&[("p1", 10)]);
  let store = open_store(memory_storage(), inventory.clone());

  let item = store.add_item(&product("p1", 250, 10), 6).await.unwrap();
  let item = store.update_quantity(item.id, 1).await.unwrap().unwrap();

  assert_eq!(item.quantity, 1);
  assert_eq!(item.subtotal(), Money::from_cents(250));
  assert_eq!(inventory.stock_of("p1"), Some(9));
  assert_eq!(store.known_stock(&ProductId::from("p1")), Some(9));
}
