// stockcart/src/inventory/ledger.rs

//! Last-known remaining stock per product, ordered by sequence tokens.
//!
//! Overlapping mutations on the same product (a double-click, two tasks
//! sharing a store) can have their reconciliation responses arrive out of
//! order. Every call takes a token before it is sent, and a response is only
//! recorded if its token is newer than the last one recorded, so an older
//! count never overwrites a fresher one.

use crate::model::ProductId;
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::{event, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceToken(u64);

impl SequenceToken {
  pub fn value(self) -> u64 {
    self.0
  }
}

#[derive(Debug, Default)]
struct Entry {
  issued: u64,
  applied: u64,
  remaining: Option<u32>,
}

#[derive(Debug, Default)]
pub struct StockLedger {
  entries: Mutex<HashMap<ProductId, Entry>>,
}

impl StockLedger {
  pub fn new() -> Self {
    Self::default()
  }

  /// Takes the next token for `product_id`. Call before sending the request.
  pub fn issue(&self, product_id: &ProductId) -> SequenceToken {
    let mut entries = self.entries.lock();
    let entry = entries.entry(product_id.clone()).or_default();
    entry.issued += 1;
    SequenceToken(entry.issued)
  }

  /// Records `remaining` observed by the request holding `token`.
  /// Returns `false` (and records nothing) when a newer observation is already in.
  pub fn apply(&self, product_id: &ProductId, token: SequenceToken, remaining: u32) -> bool {
    self.record(product_id, token, Some(remaining))
  }

  /// The request holding `token` succeeded without reporting a count; the
  /// previous count no longer holds, so the product goes back to unknown.
  pub fn forget(&self, product_id: &ProductId, token: SequenceToken) -> bool {
    self.record(product_id, token, None)
  }

  fn record(&self, product_id: &ProductId, token: SequenceToken, remaining: Option<u32>) -> bool {
    let mut entries = self.entries.lock();
    let entry = entries.entry(product_id.clone()).or_default();
    if token.0 <= entry.applied {
      event!(
        Level::DEBUG,
        product_id = %product_id,
        token = token.0,
        applied = entry.applied,
        "Stale stock observation dropped."
      );
      return false;
    }
    entry.applied = token.0;
    entry.remaining = remaining;
    true
  }

  /// Records a count seen outside reconciliation (a fresh product projection).
  /// It outranks every request already in flight for the product.
  pub fn observe(&self, product_id: &ProductId, remaining: u32) {
    let token = self.issue(product_id);
    self.apply(product_id, token, remaining);
  }

  pub fn remaining(&self, product_id: &ProductId) -> Option<u32> {
    self.entries.lock().get(product_id).and_then(|e| e.remaining)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn late_response_does_not_overwrite_newer_count() {
    let ledger = StockLedger::new();
    let p = ProductId::from("p1");

    let first = ledger.issue(&p);
    let second = ledger.issue(&p);
    assert!(ledger.apply(&p, second, 1));
    assert!(!ledger.apply(&p, first, 4));
    assert_eq!(ledger.remaining(&p), Some(1));
  }

  #[test]
  fn observation_outranks_in_flight_requests() {
    let ledger = StockLedger::new();
    let p = ProductId::from("p1");

    let in_flight = ledger.issue(&p);
    ledger.observe(&p, 7);
    assert!(!ledger.apply(&p, in_flight, 2));
    assert_eq!(ledger.remaining(&p), Some(7));
    assert_eq!(ledger.remaining(&ProductId::from("other")), None);
  }

  #[test]
  fn countless_answer_resets_to_unknown_unless_stale() {
    let ledger = StockLedger::new();
    let p = ProductId::from("p1");

    ledger.observe(&p, 5);
    let consume = ledger.issue(&p);
    assert!(ledger.forget(&p, consume));
    assert_eq!(ledger.remaining(&p), None);

    let late = ledger.issue(&p);
    ledger.observe(&p, 3);
    assert!(!ledger.forget(&p, late));
    assert_eq!(ledger.remaining(&p), Some(3));
  }
}
