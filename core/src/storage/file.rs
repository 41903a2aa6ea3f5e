// stockcart/src/storage/file.rs

use super::CartStorage;
use anyhow::Context;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{event, Level};

/// One `<key>.json` file per key under `root`. The directory is created on
/// first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
  root: PathBuf,
}

impl FileStorage {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  fn path_for(&self, key: &str) -> PathBuf {
    self.root.join(format!("{}.json", file_stem(key)))
  }
}

/// Keys carry user ids. Bytes outside `[A-Za-z0-9_-]` are written as `%XX`,
/// which keeps the stem inside `root` and maps distinct keys to distinct files.
fn file_stem(key: &str) -> String {
  let mut stem = String::with_capacity(key.len());
  for byte in key.bytes() {
    if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
      stem.push(char::from(byte));
    } else {
      stem.push_str(&format!("%{:02X}", byte));
    }
  }
  stem
}

impl CartStorage for FileStorage {
  fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
    let path = self.path_for(key);
    match fs::read_to_string(&path) {
      Ok(contents) => Ok(Some(contents)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
  }

  fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
    fs::create_dir_all(&self.root).with_context(|| format!("creating {}", self.root.display()))?;
    let path = self.path_for(key);
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, value).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, &path).with_context(|| format!("replacing {}", path.display()))?;
    event!(Level::TRACE, path = %path.display(), bytes = value.len(), "Cart record written.");
    Ok(())
  }

  fn remove(&self, key: &str) -> anyhow::Result<()> {
    let path = self.path_for(key);
    match fs::remove_file(&path) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e).with_context(|| format!("removing {}", path.display())),
    }
  }
}
