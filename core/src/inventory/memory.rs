// stockcart/src/inventory/memory.rs

use super::{StockLevel, StockReconciler};
use crate::error::ApiError;
use crate::model::ProductId;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::{info, instrument, warn};

/// An inventory living in this process: a stock table that refuses to go
/// below zero. Stands in for the backend in offline runs, examples and benches.
#[derive(Debug, Default)]
pub struct InMemoryInventory {
  stock: Mutex<HashMap<ProductId, u32>>,
}

impl InMemoryInventory {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_stock<I, K>(levels: I) -> Self
  where
    I: IntoIterator<Item = (K, u32)>,
    K: Into<ProductId>,
  {
    let inventory = Self::new();
    {
      let mut stock = inventory.stock.lock();
      for (id, level) in levels {
        stock.insert(id.into(), level);
      }
    }
    inventory
  }

  pub fn set_stock(&self, product_id: impl Into<ProductId>, level: u32) {
    self.stock.lock().insert(product_id.into(), level);
  }

  pub fn stock_of(&self, product_id: &ProductId) -> Option<u32> {
    self.stock.lock().get(product_id).copied()
  }
}

#[async_trait]
impl StockReconciler for InMemoryInventory {
  #[instrument(skip(self), fields(product_id = %product_id))]
  async fn adjust_stock(&self, product_id: &ProductId, delta: i64) -> Result<StockLevel, ApiError> {
    let mut stock = self.stock.lock();
    let Some(current) = stock.get_mut(product_id) else {
      warn!("Unknown product");
      return Err(ApiError::Rejected {
        reason: format!("unknown product {}", product_id),
      });
    };

    let next = i64::from(*current) + delta;
    if next < 0 {
      warn!(available = *current, requested = -delta, "Insufficient stock");
      return Err(ApiError::Rejected {
        reason: format!("insufficient stock: requested {}, available {}", -delta, current),
      });
    }

    *current = u32::try_from(next).unwrap_or(u32::MAX);
    info!(remaining_stock = *current, "Stock adjusted");
    Ok(StockLevel::new(product_id.clone(), *current))
  }
}
