// stockcart/examples/basic_cart.rs

use std::sync::Arc;
use stockcart::{CartError, CartStore, InMemoryInventory, MemoryStorage, Money, Product, Session};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), CartError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Basic Cart Example ---");

  // 1. An in-process inventory with five kettles, and a cart for user "u1".
  let inventory = Arc::new(InMemoryInventory::with_stock([("p1", 5)]));
  let storage = Arc::new(MemoryStorage::new());
  let cart = CartStore::open(&Session::authenticated("u1"), storage, inventory.clone())?;
  let kettle = Product::new("p1", "Kettle", Money::from_cents(1000), 5);

  // 2. Add two, then raise the line to three.
  let line = cart.add_item(&kettle, 2).await?;
  info!("Added {} x {} = {}", line.quantity, line.product.name, line.subtotal());
  if let Some(line) = cart.update_quantity(line.id, 3).await? {
    info!("Now {} x {} = {}", line.quantity, line.product.name, line.subtotal());
  }
  info!("Inventory holds {:?} kettles", inventory.stock_of(&kettle.id));

  // 3. Asking for more than the inventory reported is refused locally.
  match cart.update_quantity(line.id, 6).await {
    Err(e) => error!("Rejected as expected: {}", e),
    Ok(_) => error!("Increase beyond stock was accepted"),
  }

  // 4. Totals are always derived from the lines.
  info!("Cart: {} items, total {}", cart.item_count(), cart.total_price());

  // 5. Removing the line hands the units back.
  cart.remove_item(line.id).await?;
  info!(
    "Cart empty: {}, inventory holds {:?} kettles",
    cart.is_empty(),
    inventory.stock_of(&kettle.id)
  );

  Ok(())
}
