// storefront/src/commands/cart.rs
use super::{print_cart, print_json, CartView, LineView};
use crate::errors::Result as AppResult;
use crate::state::AppState;
use serde::Serialize;
use stockcart::{CartItemId, Money, ProductId};
use tracing::{info, instrument};

#[derive(Debug, Serialize)]
struct Removed {
  removed: Vec<LineView>,
  cart: CartView,
}

#[derive(Debug, Serialize)]
struct Receipt {
  user_id: String,
  taken_at: String,
  items: Vec<LineView>,
  item_count: u64,
  total_price: Money,
}

pub fn show(state: &AppState, json: bool) -> AppResult<()> {
  let store = state.open_cart()?;
  print_cart(&CartView::of(&store), json)
}

#[instrument(name = "command::add", skip(state, json))]
pub async fn add(state: &AppState, product_id: &str, quantity: i64, json: bool) -> AppResult<()> {
  let store = state.open_cart()?;
  // Always validate against a fresh projection, never a cached one.
  let product = state.catalog.fetch(&ProductId::from(product_id)).await?;
  let line = store.add_item(&product, quantity).await?;
  info!(item_id = %line.id, quantity = line.quantity, "Line added");

  if !json {
    println!("Added {} x {} ({}).", quantity, line.product.name, line.id);
  }
  print_cart(&CartView::of(&store), json)
}

#[instrument(name = "command::set", skip(state, json))]
pub async fn set(state: &AppState, item_id: CartItemId, quantity: i64, json: bool) -> AppResult<()> {
  let store = state.open_cart()?;
  if let Some(line) = store.item(item_id) {
    // A fresh count lets an over-stock increase fail before any remote call.
    if quantity > i64::from(line.quantity) {
      let product = state.catalog.fetch(&line.product.id).await?;
      store.observe_stock(&product);
    }
  }

  let updated = store.update_quantity(item_id, quantity).await?;
  if !json {
    match &updated {
      Some(line) => println!("{} now at {}.", line.product.name, line.quantity),
      None => println!("Line {} removed.", item_id),
    }
  }
  print_cart(&CartView::of(&store), json)
}

#[instrument(name = "command::remove", skip(state, json))]
pub async fn remove(state: &AppState, item_id: CartItemId, json: bool) -> AppResult<()> {
  let store = state.open_cart()?;
  let removed = store.remove_item(item_id).await?;
  let view = Removed {
    removed: vec![LineView::from(&removed)],
    cart: CartView::of(&store),
  };
  if json {
    return print_json(&view);
  }
  println!("Removed {} x {}.", removed.quantity, removed.product.name);
  view.cart.print();
  Ok(())
}

pub async fn clear(state: &AppState, json: bool) -> AppResult<()> {
  let store = state.open_cart()?;
  let removed = store.clear().await;
  let view = Removed {
    removed: removed.iter().map(LineView::from).collect(),
    cart: CartView::of(&store),
  };
  if json {
    return print_json(&view);
  }
  println!("Cleared {} line(s).", view.removed.len());
  Ok(())
}

pub fn checkout(state: &AppState, json: bool) -> AppResult<()> {
  let store = state.open_cart()?;
  let Some(snapshot) = store.checkout_snapshot() else {
    if json {
      return print_json(&serde_json::Value::Null);
    }
    println!("Cart is empty; nothing to check out.");
    return Ok(());
  };

  let receipt = Receipt {
    user_id: snapshot.owner.user_id.clone(),
    taken_at: snapshot.taken_at.to_rfc3339(),
    items: snapshot.items.iter().map(LineView::from).collect(),
    item_count: snapshot.item_count(),
    total_price: snapshot.total_price(),
  };
  if json {
    return print_json(&receipt);
  }
  println!(
    "Checked out {} item(s) for {} at {}.",
    receipt.item_count,
    receipt.total_price,
    snapshot.taken_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M")
  );
  Ok(())
}

pub async fn logout(state: &AppState, json: bool) -> AppResult<()> {
  let store = state.open_cart()?;
  let user_id = store.owner().user_id.clone();
  let removed = store.logout().await;
  if json {
    return print_json(&serde_json::json!({ "user_id": user_id, "released_lines": removed.len() }));
  }
  println!("Logged out {}; {} line(s) released.", user_id, removed.len());
  Ok(())
}
