// stockcart/src/storage/memory.rs

use super::CartStorage;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Process-local storage. Clones do not share data; wrap in an `Arc` to share.
#[derive(Debug, Default)]
pub struct MemoryStorage {
  entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.entries.lock().contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.entries.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.lock().is_empty()
  }
}

impl CartStorage for MemoryStorage {
  fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
    Ok(self.entries.lock().get(key).cloned())
  }

  fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
    self.entries.lock().insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove(&self, key: &str) -> anyhow::Result<()> {
    self.entries.lock().remove(key);
    Ok(())
  }
}
