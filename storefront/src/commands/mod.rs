// storefront/src/commands/mod.rs

//! One handler per subcommand. Handlers return what they did as a
//! serializable view; `render` prints it for humans or as JSON.

pub mod cart;
pub mod catalog;
pub mod health;

use crate::cli::Command;
use crate::errors::Result as AppResult;
use crate::state::AppState;
use serde::Serialize;
use stockcart::{CartItem, CartStore, Money};

#[derive(Debug, Serialize)]
pub struct CartView {
  pub user_id: String,
  pub items: Vec<LineView>,
  pub item_count: u64,
  pub total_price: Money,
}

#[derive(Debug, Serialize)]
pub struct LineView {
  pub id: String,
  pub product_id: String,
  pub name: String,
  pub quantity: u32,
  pub unit_price: Money,
  pub subtotal: Money,
}

impl From<&CartItem> for LineView {
  fn from(item: &CartItem) -> Self {
    Self {
      id: item.id.to_string(),
      product_id: item.product.id.to_string(),
      name: item.product.name.clone(),
      quantity: item.quantity,
      unit_price: item.unit_price,
      subtotal: item.subtotal(),
    }
  }
}

impl CartView {
  pub fn of(store: &CartStore) -> Self {
    Self {
      user_id: store.owner().user_id.clone(),
      items: store.items().iter().map(LineView::from).collect(),
      item_count: store.item_count(),
      total_price: store.total_price(),
    }
  }

  fn print(&self) {
    if self.items.is_empty() {
      println!("Cart of {} is empty.", self.user_id);
      return;
    }
    println!("Cart of {}:", self.user_id);
    for line in &self.items {
      println!(
        "  {}  {:<24} {:>3} x {:>8} = {:>9}  [{}]",
        line.id, line.name, line.quantity, line.unit_price, line.subtotal, line.product_id
      );
    }
    println!("  {} item(s), total {}", self.item_count, self.total_price);
  }
}

/// Dispatches a parsed command.
pub async fn run(state: &AppState, command: Command, json: bool) -> AppResult<()> {
  match command {
    Command::Products => catalog::products(state, json).await,
    Command::Show => cart::show(state, json),
    Command::Add { product_id, quantity } => cart::add(state, &product_id, quantity, json).await,
    Command::Set { item_id, quantity } => cart::set(state, item_id, quantity, json).await,
    Command::Remove { item_id } => cart::remove(state, item_id, json).await,
    Command::Clear => cart::clear(state, json).await,
    Command::Checkout => cart::checkout(state, json),
    Command::Logout => cart::logout(state, json).await,
    Command::Health { watch } => health::health(state, watch, json).await,
  }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

pub(crate) fn print_cart(view: &CartView, json: bool) -> AppResult<()> {
  if json {
    return print_json(view);
  }
  view.print();
  Ok(())
}
