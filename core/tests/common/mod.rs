// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use stockcart::{
  ApiError, CartStorage, CartStore, InMemoryInventory, MemoryStorage, Money, Product, ProductId, Session,
  StockLevel, StockReconciler,
};
use tracing::Level;

pub const USER: &str = "u1";

// --- Products ---
pub fn product(id: &str, price_cents: i64, stock: u32) -> Product {
  Product::new(id, format!("Product {}", id), Money::from_cents(price_cents), stock)
}

// --- Reconciler that records every delta and can be told to fail ---
#[derive(Default)]
pub struct ScriptedInventory {
  pub inner: InMemoryInventory,
  calls: Mutex<Vec<(ProductId, i64)>>,
  fail_consume: AtomicBool,
  fail_restore: AtomicBool,
}

impl ScriptedInventory {
  pub fn with_stock(levels: &[(&str, u32)]) -> Arc<Self> {
    let inventory = Self::default();
    for (id, level) in levels {
      inventory.inner.set_stock(*id, *level);
    }
    Arc::new(inventory)
  }

  /// Negative deltas fail with a 503 before touching stock.
  pub fn fail_consume(&self, fail: bool) {
    self.fail_consume.store(fail, Ordering::SeqCst);
  }

  /// Positive deltas fail with a 503 before touching stock.
  pub fn fail_restore(&self, fail: bool) {
    self.fail_restore.store(fail, Ordering::SeqCst);
  }

  pub fn calls(&self) -> Vec<(ProductId, i64)> {
    self.calls.lock().clone()
  }

  pub fn stock_of(&self, id: &str) -> Option<u32> {
    self.inner.stock_of(&ProductId::from(id))
  }
}

#[async_trait]
impl StockReconciler for ScriptedInventory {
  async fn adjust_stock(&self, product_id: &ProductId, delta: i64) -> Result<StockLevel, ApiError> {
    self.calls.lock().push((product_id.clone(), delta));
    let failing = if delta < 0 { &self.fail_consume } else { &self.fail_restore };
    if failing.load(Ordering::SeqCst) {
      return Err(ApiError::Status {
        status: 503,
        body: "inventory unavailable".to_string(),
      });
    }
    self.inner.adjust_stock(product_id, delta).await
  }
}

// --- Reconciler answering from a script, each answer after its own delay ---
pub struct DelayedInventory {
  script: Mutex<VecDeque<(Duration, u32)>>,
}

impl DelayedInventory {
  pub fn new(script: Vec<(Duration, u32)>) -> Arc<Self> {
    Arc::new(Self {
      script: Mutex::new(script.into()),
    })
  }
}

#[async_trait]
impl StockReconciler for DelayedInventory {
  async fn adjust_stock(&self, product_id: &ProductId, _delta: i64) -> Result<StockLevel, ApiError> {
    let next = self.script.lock().pop_front();
    let Some((delay, stock)) = next else {
      return Err(ApiError::Rejected {
        reason: "script exhausted".to_string(),
      });
    };
    tokio::time::sleep(delay).await;
    Ok(StockLevel::new(product_id.clone(), stock))
  }
}

// --- Storage that is always unavailable ---
pub struct BrokenStorage;

impl CartStorage for BrokenStorage {
  fn read(&self, _key: &str) -> anyhow::Result<Option<String>> {
    Err(anyhow::anyhow!("storage unavailable"))
  }

  fn write(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
    Err(anyhow::anyhow!("storage unavailable"))
  }

  fn remove(&self, _key: &str) -> anyhow::Result<()> {
    Err(anyhow::anyhow!("storage unavailable"))
  }
}

pub fn open_store(storage: Arc<dyn CartStorage>, reconciler: Arc<dyn StockReconciler>) -> CartStore {
  CartStore::open(&Session::authenticated(USER), storage, reconciler).expect("authenticated session opens a cart")
}

pub fn memory_storage() -> Arc<MemoryStorage> {
  Arc::new(MemoryStorage::new())
}

/// Reads the stored cart record back through a fresh store.
pub fn stored_items(storage: Arc<dyn CartStorage>) -> Vec<stockcart::CartItem> {
  stockcart::CartRepository::new(storage)
    .try_load(&stockcart::UserIdentity::new(USER))
    .expect("stored cart decodes")
}

pub fn assert_line_invariants(store: &CartStore) {
  let items = store.items();
  for item in &items {
    assert!(item.quantity > 0, "line {} has zero quantity", item.id);
    assert_eq!(item.subtotal(), item.unit_price * item.quantity);
  }
  let count: u64 = items.iter().map(|i| u64::from(i.quantity)).sum();
  let total: Money = items.iter().map(|i| i.subtotal()).sum();
  assert_eq!(store.item_count(), count);
  assert_eq!(store.total_price(), total);
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
