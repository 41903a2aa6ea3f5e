// stockcart/src/inventory/mod.rs

//! Stock reconciliation: telling the inventory service about every quantity
//! delta a cart applies.

pub mod ledger;
pub mod memory;

pub use ledger::{SequenceToken, StockLedger};
pub use memory::InMemoryInventory;

use crate::error::ApiError;
use crate::model::ProductId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// What the inventory reported after a delta was applied.
///
/// Any 2xx answer means the delta was applied. Backends that answer with a
/// plain acknowledgement (`{"message": "ok"}`, an empty 204) leave `stock`
/// unset; the cart then treats the remaining count as unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireStockLevel")]
pub struct StockLevel {
  pub product_id: Option<ProductId>,
  pub stock: Option<u32>,
}

impl StockLevel {
  pub fn new(product_id: ProductId, stock: u32) -> Self {
    Self {
      product_id: Some(product_id),
      stock: Some(stock),
    }
  }

  /// A successful answer that carried no count.
  pub fn acknowledged(product_id: ProductId) -> Self {
    Self {
      product_id: Some(product_id),
      stock: None,
    }
  }
}

/// Every spelling the backends use, kept as separate fields so a body that
/// carries two of them (`id` next to `_id`) still decodes.
#[derive(Deserialize)]
struct WireStockLevel {
  product_id: Option<ProductId>,
  id: Option<ProductId>,
  #[serde(rename = "_id")]
  object_id: Option<ProductId>,
  stock: Option<u32>,
  #[serde(rename = "stockQuantity", alias = "stock_quantity")]
  stock_quantity: Option<u32>,
}

impl From<WireStockLevel> for StockLevel {
  fn from(wire: WireStockLevel) -> Self {
    Self {
      product_id: wire.product_id.or(wire.id).or(wire.object_id),
      stock: wire.stock.or(wire.stock_quantity),
    }
  }
}

/// Remote side of stock reconciliation.
///
/// `delta` is signed: negative when the cart consumes units, positive when it
/// hands them back. One call per delta; implementations do not retry.
#[async_trait]
pub trait StockReconciler: Send + Sync {
  async fn adjust_stock(&self, product_id: &ProductId, delta: i64) -> Result<StockLevel, ApiError>;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn explicit_id_wins_over_object_id() {
    let level: StockLevel = serde_json::from_str(r#"{"id": "p1", "_id": "65f0c2", "stock": 2}"#).unwrap();
    assert_eq!(level, StockLevel::new(ProductId::from("p1"), 2));

    let level: StockLevel = serde_json::from_str(r#"{"_id": "65f0c2", "stockQuantity": 9}"#).unwrap();
    assert_eq!(level, StockLevel::new(ProductId::from("65f0c2"), 9));
  }

  #[test]
  fn acknowledgement_without_count_decodes() {
    let level: StockLevel = serde_json::from_str(r#"{"message": "Stock updated"}"#).unwrap();
    assert_eq!(level.product_id, None);
    assert_eq!(level.stock, None);
  }
}
