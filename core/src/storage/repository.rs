// stockcart/src/storage/repository.rs

//! Binds a [`CartStorage`] to the per-user `cart_<userId>` record and its JSON form.

use super::CartStorage;
use crate::error::{CartError, CartResult};
use crate::model::{CartItem, UserIdentity};
use std::sync::Arc;
use tracing::{event, Level};

#[derive(Clone)]
pub struct CartRepository {
  storage: Arc<dyn CartStorage>,
}

impl CartRepository {
  pub fn new(storage: Arc<dyn CartStorage>) -> Self {
    Self { storage }
  }

  /// Reads the stored cart, failing on unreadable or corrupt records.
  pub fn try_load(&self, owner: &UserIdentity) -> CartResult<Vec<CartItem>> {
    let key = owner.cart_key();
    let raw = self
      .storage
      .read(&key)
      .map_err(|source| CartError::Persistence { key: key.clone(), source })?;

    let Some(raw) = raw else {
      return Ok(Vec::new());
    };

    let items: Vec<CartItem> = serde_json::from_str(&raw).map_err(|e| CartError::Persistence {
      key: key.clone(),
      source: anyhow::Error::new(e).context("decoding stored cart"),
    })?;

    // Zero-quantity lines cannot be produced by the store; drop them if a
    // hand-edited or foreign record carries any.
    let before = items.len();
    let items: Vec<CartItem> = items.into_iter().filter(|item| item.quantity > 0).collect();
    if items.len() != before {
      event!(Level::WARN, key = %key, dropped = before - items.len(), "Dropped empty lines from stored cart.");
    }
    Ok(items)
  }

  /// Reads the stored cart; any storage failure yields an empty cart.
  pub fn load(&self, owner: &UserIdentity) -> Vec<CartItem> {
    match self.try_load(owner) {
      Ok(items) => {
        event!(Level::DEBUG, user_id = %owner.user_id, lines = items.len(), "Stored cart loaded.");
        items
      }
      Err(e) => {
        event!(Level::WARN, user_id = %owner.user_id, error = %e, "Stored cart unusable, starting empty.");
        Vec::new()
      }
    }
  }

  pub fn save(&self, owner: &UserIdentity, items: &[CartItem]) -> CartResult<()> {
    let key = owner.cart_key();
    let raw = serde_json::to_string(items).map_err(|e| CartError::Persistence {
      key: key.clone(),
      source: anyhow::Error::new(e).context("encoding cart"),
    })?;
    self
      .storage
      .write(&key, &raw)
      .map_err(|source| CartError::Persistence { key, source })
  }

  pub fn delete(&self, owner: &UserIdentity) -> CartResult<()> {
    let key = owner.cart_key();
    self
      .storage
      .remove(&key)
      .map_err(|source| CartError::Persistence { key, source })
  }
}
