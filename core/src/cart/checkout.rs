// stockcart/src/cart/checkout.rs

use crate::model::{CartItem, Money, UserIdentity};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The lines a cart handed over to an order. The stock they consumed stays
/// consumed.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSnapshot {
  pub owner: UserIdentity,
  pub items: Vec<CartItem>,
  pub taken_at: DateTime<Utc>,
}

impl CheckoutSnapshot {
  pub fn item_count(&self) -> u64 {
    self.items.iter().map(|line| u64::from(line.quantity)).sum()
  }

  pub fn total_price(&self) -> Money {
    self.items.iter().map(CartItem::subtotal).sum()
  }
}
