// stockcart/src/model/cart_item.rs

use super::{Money, Product, ProductRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartItemId(Uuid);

impl CartItemId {
  pub fn new() -> Self {
    CartItemId(Uuid::new_v4())
  }
}

impl Default for CartItemId {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for CartItemId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

impl FromStr for CartItemId {
  type Err = uuid::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Uuid::parse_str(s).map(CartItemId)
  }
}

/// One cart line. The subtotal is never stored; see [`CartItem::subtotal`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
  pub id: CartItemId,
  pub product: ProductRef,
  pub quantity: u32,
  pub unit_price: Money,
  pub added_at: DateTime<Utc>,
}

impl CartItem {
  pub fn new(product: &Product, quantity: u32) -> Self {
    Self {
      id: CartItemId::new(),
      product: product.reference(),
      quantity,
      unit_price: product.price,
      added_at: Utc::now(),
    }
  }

  pub fn subtotal(&self) -> Money {
    self.unit_price * self.quantity
  }
}
