// stockcart/src/storage/mod.rs

//! Local key-value persistence for carts.
//!
//! Access is synchronous: a write is a small JSON document, and callers never
//! hold a lock on cart state while touching storage.

pub mod file;
pub mod memory;
pub mod repository;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use repository::CartRepository;

/// A string key-value store, the moral equivalent of a browser's local storage.
pub trait CartStorage: Send + Sync {
  /// `Ok(None)` when the key has never been written or was removed.
  fn read(&self, key: &str) -> anyhow::Result<Option<String>>;

  fn write(&self, key: &str, value: &str) -> anyhow::Result<()>;

  /// Removing a missing key is not an error.
  fn remove(&self, key: &str) -> anyhow::Result<()>;
}
