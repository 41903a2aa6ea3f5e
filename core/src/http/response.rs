// stockcart/src/http/response.rs

//! The backend answers some endpoints with a bare value and others with a
//! `{"data": ...}` envelope. Responses are decoded into these sum types once,
//! at the boundary, and normalized before anything else sees them.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
  Envelope { data: Vec<T> },
  RawList(Vec<T>),
}

impl<T> ListResponse<T> {
  pub fn into_items(self) -> Vec<T> {
    match self {
      ListResponse::Envelope { data } => data,
      ListResponse::RawList(items) => items,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ItemResponse<T> {
  Envelope { data: T },
  Bare(T),
}

impl<T> ItemResponse<T> {
  pub fn into_inner(self) -> T {
    match self {
      ItemResponse::Envelope { data } => data,
      ItemResponse::Bare(item) => item,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::inventory::StockLevel;
  use crate::model::Product;

  #[test]
  fn list_shapes_normalize_to_the_same_items() {
    let raw = r#"[{"id": 1, "name": "Mug", "price": 8.5, "stock": 3}]"#;
    let wrapped = r#"{"data": [{"id": 1, "name": "Mug", "price": 8.5, "stock": 3}], "total": 1}"#;

    let a: ListResponse<Product> = serde_json::from_str(raw).unwrap();
    let b: ListResponse<Product> = serde_json::from_str(wrapped).unwrap();
    assert!(matches!(a, ListResponse::RawList(_)));
    assert!(matches!(b, ListResponse::Envelope { .. }));
    assert_eq!(a.into_items(), b.into_items());
  }

  #[test]
  fn item_envelope_is_unwrapped() {
    let wrapped = r#"{"data": {"_id": "p1", "stockQuantity": 4}}"#;
    let level: ItemResponse<StockLevel> = serde_json::from_str(wrapped).unwrap();
    let level = level.into_inner();
    assert_eq!(level.stock, Some(4));
    assert_eq!(level.product_id.unwrap().as_str(), "p1");
  }
}
