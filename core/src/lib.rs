// src/lib.rs

//! stockcart: a client-side shopping cart that keeps a remote inventory informed.
//!
//! The crate covers the parts of a storefront client that carry state:
//!  - A cart store with line items, derived totals and per-user persistence.
//!  - Stock reconciliation: one signed delta per quantity change, sent to the
//!    inventory endpoint, with sequence tokens so late answers never clobber
//!    a fresher stock count.
//!  - A thin catalog reader that normalizes enveloped and bare responses.
//!  - A backend health monitor with an explicit start/stop lifecycle.

pub mod cart;
pub mod error;
pub mod health;
pub mod http;
pub mod inventory;
pub mod model;
pub mod shared;
pub mod storage;

// --- Re-exports for the Public API ---

pub use crate::cart::{CartStore, CheckoutSnapshot};
pub use crate::model::{CartItem, CartItemId, Money, Product, ProductId, ProductRef, Session, UserIdentity};

pub use crate::inventory::{InMemoryInventory, StockLedger, StockLevel, StockReconciler};
pub use crate::storage::{CartRepository, CartStorage, FileStorage, MemoryStorage};

pub use crate::http::{ApiEndpoint, CatalogClient, HttpStockClient, ItemResponse, ListResponse};
pub use crate::health::{HealthMonitor, HealthProbe, HealthState, HealthStatus, HttpHealthProbe};

pub use crate::error::{ApiError, CartError, CartResult};
pub use crate::shared::SharedState;

/*
    Typical session:
    1. Build an `ApiEndpoint` (base URL, bearer token, timeout).
    2. Open the user's cart: `CartStore::open(&session, storage, Arc::new(HttpStockClient::new(endpoint)))`.
       Anonymous sessions are refused; a broken stored record yields an empty cart.
    3. Fetch a `Product` through `CatalogClient` and call `add_item(&product, qty)`.
    4. `update_quantity`, `remove_item`, `clear` as the user edits the cart; totals are
       read with `item_count()` / `total_price()`.
    5. On logout call `logout()`; on order placement take `checkout_snapshot()`.
*/
