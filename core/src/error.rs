// stockcart/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

use crate::model::{CartItemId, ProductId};

/// Failures at the HTTP boundary (stock reconciliation, catalog, health probe).
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("Transport error: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("Backend responded with status {status}: {body}")]
  Status { status: u16, body: String },

  #[error("Could not decode {context}. Source: {source}")]
  Decode {
    context: String,
    #[source]
    source: serde_json::Error,
  },

  /// The inventory refused the delta without a transport round trip
  /// (in-process inventories, invalid endpoints).
  #[error("Request rejected: {reason}")]
  Rejected { reason: String },
}

impl ApiError {
  /// HTTP status when the backend answered, if any.
  pub fn status(&self) -> Option<u16> {
    match self {
      ApiError::Status { status, .. } => Some(*status),
      ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
      _ => None,
    }
  }
}

#[derive(Debug, Error)]
pub enum CartError {
  #[error("Quantity must be a positive number (got {quantity})")]
  InvalidQuantity { quantity: i64 },

  #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
  InsufficientStock {
    product_id: ProductId,
    requested: u64,
    available: u64,
  },

  #[error("Cart item not found: {item_id}")]
  ItemNotFound { item_id: CartItemId },

  #[error("A cart requires an authenticated user")]
  Unauthenticated,

  #[error("Stock reconciliation failed for product {product_id}. Source: {source}")]
  Reconciliation {
    product_id: ProductId,
    #[source]
    source: ApiError,
  },

  #[error("Cart storage failed for key '{key}'. Source: {source}")]
  Persistence {
    key: String,
    #[source]
    source: AnyhowError,
  },
}

impl CartError {
  /// Local validation failures, rejected before any network call.
  pub fn is_validation(&self) -> bool {
    matches!(
      self,
      CartError::InvalidQuantity { .. } | CartError::InsufficientStock { .. }
    )
  }
}

pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
