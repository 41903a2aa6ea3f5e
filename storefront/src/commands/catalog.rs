// storefront/src/commands/catalog.rs
use super::print_json;
use crate::errors::Result as AppResult;
use crate::state::AppState;

pub async fn products(state: &AppState, json: bool) -> AppResult<()> {
  let products = state.catalog.list().await?;
  if json {
    return print_json(&products);
  }
  if products.is_empty() {
    println!("The catalog is empty.");
    return Ok(());
  }
  for product in &products {
    let availability = match product.stock {
      0 => "out of stock".to_string(),
      n => format!("{} in stock", n),
    };
    println!("  {:<12} {:<24} {:>9}  {}", product.id.as_str(), product.name, product.price, availability);
  }
  Ok(())
}
