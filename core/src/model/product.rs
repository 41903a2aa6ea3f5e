// stockcart/src/model/product.rs

use super::Money;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque product token issued by the backend. Numeric ids are accepted and
/// kept in their decimal string form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
  pub fn new(id: impl Into<String>) -> Self {
    ProductId(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ProductId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for ProductId {
  fn from(id: &str) -> Self {
    ProductId(id.to_string())
  }
}

impl From<String> for ProductId {
  fn from(id: String) -> Self {
    ProductId(id)
  }
}

impl<'de> Deserialize<'de> for ProductId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireId {
      Text(String),
      Number(i64),
    }

    Ok(match WireId::deserialize(deserializer)? {
      WireId::Text(s) => ProductId(s),
      WireId::Number(n) => ProductId(n.to_string()),
    })
  }
}

/// Read-only projection of a catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireProduct")]
pub struct Product {
  pub id: ProductId,
  pub name: String,
  pub price: Money,
  /// Units the backend still holds; what a cart may take.
  pub stock: u32,
}

/// Catalog entries as the backends send them. Document stores add `_id`
/// next to (or instead of) `id`, and the count has three spellings; each is
/// its own field so any combination decodes.
#[derive(Deserialize)]
struct WireProduct {
  id: Option<ProductId>,
  #[serde(rename = "_id")]
  object_id: Option<ProductId>,
  name: String,
  price: Money,
  stock: Option<u32>,
  #[serde(rename = "stockQuantity", alias = "stock_quantity")]
  stock_quantity: Option<u32>,
}

impl TryFrom<WireProduct> for Product {
  type Error = String;

  fn try_from(wire: WireProduct) -> Result<Self, Self::Error> {
    let id = wire
      .id
      .or(wire.object_id)
      .ok_or_else(|| format!("product '{}' has neither `id` nor `_id`", wire.name))?;
    Ok(Self {
      id,
      name: wire.name,
      price: wire.price,
      stock: wire.stock.or(wire.stock_quantity).unwrap_or(0),
    })
  }
}

impl Product {
  pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money, stock: u32) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      price,
      stock,
    }
  }

  pub fn reference(&self) -> ProductRef {
    ProductRef {
      id: self.id.clone(),
      name: self.name.clone(),
    }
  }
}

/// The part of a product a cart line keeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
  pub id: ProductId,
  pub name: String,
}
