// stockcart/src/cart/store.rs

//! The client-side cart: line items, derived totals, per-user persistence and
//! stock reconciliation for every quantity delta.
//!
//! Reconciliation policy:
//! - additions and increases are sent first and only committed locally when
//!   the inventory accepts them;
//! - removals and decreases are committed (and persisted) first, and the
//!   stock restore is best-effort: a failure is logged, never returned.
//!
//! All methods take `&self`. Cart lines sit behind a blocking lock that is
//! only held for the mutation plus its storage write, never across a
//! network call, so overlapping operations on one store are safe; quantity
//! changes are applied as deltas and commute.

use super::checkout::CheckoutSnapshot;
use crate::error::{CartError, CartResult};
use crate::inventory::{StockLedger, StockLevel, StockReconciler};
use crate::model::{CartItem, CartItemId, Money, Product, ProductId, Session, UserIdentity};
use crate::shared::SharedState;
use crate::storage::{CartRepository, CartStorage};
use chrono::Utc;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub struct CartStore {
  owner: UserIdentity,
  lines: SharedState<Vec<CartItem>>,
  ledger: StockLedger,
  repository: CartRepository,
  reconciler: Arc<dyn StockReconciler>,
}

impl CartStore {
  /// Opens the cart of the session's user, loading its stored record.
  ///
  /// A missing, unreadable or corrupt record gives an empty cart. Fails only
  /// for anonymous sessions, which never own a cart.
  #[instrument(name = "CartStore::open", skip_all)]
  pub fn open(
    session: &Session,
    storage: Arc<dyn CartStorage>,
    reconciler: Arc<dyn StockReconciler>,
  ) -> CartResult<Self> {
    let owner = session.user().cloned().ok_or(CartError::Unauthenticated)?;
    let repository = CartRepository::new(storage);
    let lines = repository.load(&owner);
    info!(user_id = %owner.user_id, lines = lines.len(), "Cart opened");

    Ok(Self {
      owner,
      lines: SharedState::new(lines),
      ledger: StockLedger::new(),
      repository,
      reconciler,
    })
  }

  pub fn owner(&self) -> &UserIdentity {
    &self.owner
  }

  pub fn items(&self) -> Vec<CartItem> {
    self.lines.snapshot()
  }

  pub fn item(&self, item_id: CartItemId) -> Option<CartItem> {
    self.lines.read().iter().find(|line| line.id == item_id).cloned()
  }

  pub fn item_for_product(&self, product_id: &ProductId) -> Option<CartItem> {
    self.lines.read().iter().find(|line| &line.product.id == product_id).cloned()
  }

  pub fn is_empty(&self) -> bool {
    self.lines.read().is_empty()
  }

  /// Sum of quantities over the current lines.
  pub fn item_count(&self) -> u64 {
    self.lines.read().iter().map(|line| u64::from(line.quantity)).sum()
  }

  /// Sum of subtotals over the current lines.
  pub fn total_price(&self) -> Money {
    self.lines.read().iter().map(CartItem::subtotal).sum()
  }

  /// Remaining stock last reported for `product_id`, if any was seen this session.
  pub fn known_stock(&self, product_id: &ProductId) -> Option<u32> {
    self.ledger.remaining(product_id)
  }

  /// Records a freshly fetched projection's stock as the latest known count,
  /// so quantity increases are checked against it.
  pub fn observe_stock(&self, product: &Product) {
    self.ledger.observe(&product.id, product.stock);
  }

  /// Adds `quantity` units of `product`, creating its line or growing the
  /// existing one (which also picks up the projection's name and price).
  ///
  /// `quantity` must be positive and no larger than `product.stock`; either
  /// failure is reported before any remote call.
  #[instrument(
    skip(self, product),
    fields(user_id = %self.owner.user_id, product_id = %product.id),
    err(Display)
  )]
  pub async fn add_item(&self, product: &Product, quantity: i64) -> CartResult<CartItem> {
    if quantity <= 0 {
      return Err(CartError::InvalidQuantity { quantity });
    }
    let units = match u32::try_from(quantity) {
      Ok(units) if units <= product.stock => units,
      _ => {
        warn!(available = product.stock, requested = quantity, "Insufficient stock");
        return Err(CartError::InsufficientStock {
          product_id: product.id.clone(),
          requested: quantity.unsigned_abs(),
          available: u64::from(product.stock),
        });
      }
    };

    self.ledger.observe(&product.id, product.stock);
    self.reconcile(&product.id, -i64::from(units)).await?;

    let item = self.commit(|lines| match lines.iter_mut().find(|line| line.product.id == product.id) {
      Some(line) => {
        line.quantity = line.quantity.saturating_add(units);
        line.product = product.reference();
        line.unit_price = product.price;
        line.clone()
      }
      None => {
        let line = CartItem::new(product, units);
        lines.push(line.clone());
        line
      }
    });

    info!(item_id = %item.id, quantity = item.quantity, subtotal = %item.subtotal(), "Item added to cart");
    Ok(item)
  }

  /// Sets a line's quantity. Returns the updated line, or `None` when
  /// `new_quantity <= 0` removed it.
  #[instrument(skip(self), fields(user_id = %self.owner.user_id), err(Display))]
  pub async fn update_quantity(&self, item_id: CartItemId, new_quantity: i64) -> CartResult<Option<CartItem>> {
    if new_quantity <= 0 {
      self.remove_item(item_id).await?;
      return Ok(None);
    }

    let line = self.item(item_id).ok_or(CartError::ItemNotFound { item_id })?;
    let current = line.quantity;
    let product_id = line.product.id.clone();
    let remaining = self.ledger.remaining(&product_id);
    let insufficient = |requested: u64| CartError::InsufficientStock {
      product_id: product_id.clone(),
      requested,
      available: u64::from(current) + u64::from(remaining.unwrap_or(0)),
    };

    let Ok(target) = u32::try_from(new_quantity) else {
      return Err(insufficient(new_quantity.unsigned_abs()));
    };

    match target.cmp(&current) {
      Ordering::Equal => {
        debug!("Quantity unchanged");
        Ok(Some(line))
      }
      Ordering::Greater => {
        let delta = target - current;
        // Without a known count the inventory is the only judge.
        if let Some(remaining) = remaining {
          if delta > remaining {
            warn!(remaining, requested = target, "Insufficient stock");
            return Err(insufficient(u64::from(target)));
          }
        }

        self.reconcile(&product_id, -i64::from(delta)).await?;

        match self.commit(|lines| apply_delta(lines, item_id, i64::from(delta))) {
          DeltaOutcome::Updated(updated) => {
            info!(quantity = updated.quantity, subtotal = %updated.subtotal(), "Quantity increased");
            Ok(Some(updated))
          }
          DeltaOutcome::Missing | DeltaOutcome::Removed { .. } => {
            // Removed while the request was in flight: hand the units back.
            self.restore(&product_id, delta).await;
            Err(CartError::ItemNotFound { item_id })
          }
        }
      }
      Ordering::Less => {
        let delta = current - target;
        // Only units this call actually took out of the line go back; a
        // concurrent removal already restored the rest.
        match self.commit(|lines| apply_delta(lines, item_id, -i64::from(delta))) {
          DeltaOutcome::Updated(updated) => {
            self.restore(&product_id, delta).await;
            info!(quantity = updated.quantity, subtotal = %updated.subtotal(), "Quantity decreased");
            Ok(Some(updated))
          }
          DeltaOutcome::Removed { units } => {
            self.restore(&product_id, units).await;
            info!(units, "Line emptied by a concurrent decrease");
            Ok(None)
          }
          DeltaOutcome::Missing => {
            debug!("Line already removed; nothing to restore");
            Ok(None)
          }
        }
      }
    }
  }

  /// Removes a line unconditionally and returns it. The stock restore that
  /// follows is best-effort; its failure does not bring the line back.
  #[instrument(skip(self), fields(user_id = %self.owner.user_id), err(Display))]
  pub async fn remove_item(&self, item_id: CartItemId) -> CartResult<CartItem> {
    let removed = self
      .commit(|lines| {
        let index = lines.iter().position(|line| line.id == item_id)?;
        Some(lines.remove(index))
      })
      .ok_or(CartError::ItemNotFound { item_id })?;

    info!(product_id = %removed.product.id, quantity = removed.quantity, "Item removed from cart");
    self.restore(&removed.product.id, removed.quantity).await;
    Ok(removed)
  }

  /// Empties the cart, deletes its stored record and returns every line's
  /// units to stock (best-effort). Returns the lines that were removed.
  #[instrument(skip(self), fields(user_id = %self.owner.user_id))]
  pub async fn clear(&self) -> Vec<CartItem> {
    let removed = self.take_all();
    info!(lines = removed.len(), "Cart cleared");
    for line in &removed {
      self.restore(&line.product.id, line.quantity).await;
    }
    removed
  }

  /// Ends the session: clears the cart (returning its stock) and drops the store.
  pub async fn logout(self) -> Vec<CartItem> {
    info!(user_id = %self.owner.user_id, "Logging out");
    self.clear().await
  }

  /// Hands the current lines to an order and empties the cart **without**
  /// restoring stock; the units now belong to the order. `None` when empty.
  #[instrument(skip(self), fields(user_id = %self.owner.user_id))]
  pub fn checkout_snapshot(&self) -> Option<CheckoutSnapshot> {
    let items = self.take_all();
    if items.is_empty() {
      return None;
    }
    let snapshot = CheckoutSnapshot {
      owner: self.owner.clone(),
      items,
      taken_at: Utc::now(),
    };
    info!(lines = snapshot.items.len(), total = %snapshot.total_price(), "Cart handed to checkout");
    Some(snapshot)
  }

  /// One remote call for one delta. The ledger token is taken before sending
  /// so a late answer cannot overwrite a fresher count.
  async fn reconcile(&self, product_id: &ProductId, delta: i64) -> CartResult<StockLevel> {
    let token = self.ledger.issue(product_id);
    match self.reconciler.adjust_stock(product_id, delta).await {
      Ok(level) => {
        match level.stock {
          Some(remaining) => self.ledger.apply(product_id, token, remaining),
          None => self.ledger.forget(product_id, token),
        };
        Ok(level)
      }
      Err(source) => {
        warn!(product_id = %product_id, delta, error = %source, "Stock reconciliation failed");
        Err(CartError::Reconciliation {
          product_id: product_id.clone(),
          source,
        })
      }
    }
  }

  async fn restore(&self, product_id: &ProductId, units: u32) {
    if units == 0 {
      return;
    }
    if let Err(e) = self.reconcile(product_id, i64::from(units)).await {
      warn!(product_id = %product_id, units, error = %e, "Stock restore failed; local change kept");
    }
  }

  /// Runs `mutate` on the lines and persists the result inside the same
  /// critical section, so stored records follow mutation order.
  fn commit<R>(&self, mutate: impl FnOnce(&mut Vec<CartItem>) -> R) -> R {
    self.lines.update(|lines| {
      let outcome = mutate(lines);
      if let Err(e) = self.repository.save(&self.owner, lines) {
        warn!(error = %e, "Cart persistence failed; in-memory cart kept");
      }
      outcome
    })
  }

  fn take_all(&self) -> Vec<CartItem> {
    self.lines.update(|lines| {
      let removed = std::mem::take(lines);
      if let Err(e) = self.repository.delete(&self.owner) {
        warn!(error = %e, "Could not delete stored cart");
      }
      removed
    })
  }
}

#[derive(Debug, PartialEq)]
enum DeltaOutcome {
  /// The line no longer exists; nothing was changed.
  Missing,
  /// The delta took the line to zero or below and it was dropped, holding `units`.
  Removed { units: u32 },
  Updated(CartItem),
}

/// Applies a signed delta to one line; a line that drops to zero is removed.
fn apply_delta(lines: &mut Vec<CartItem>, item_id: CartItemId, delta: i64) -> DeltaOutcome {
  let Some(index) = lines.iter().position(|line| line.id == item_id) else {
    return DeltaOutcome::Missing;
  };
  let next = i64::from(lines[index].quantity) + delta;
  if next <= 0 {
    let removed = lines.remove(index);
    return DeltaOutcome::Removed { units: removed.quantity };
  }
  let line = &mut lines[index];
  line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
  DeltaOutcome::Updated(line.clone())
}
