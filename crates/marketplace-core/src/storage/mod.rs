// crates/marketplace-core/src/storage/mod.rs

//! Key-value storage abstraction.
//!
//! The repository never touches a concrete backend: it reads and writes
//! opaque byte values under a handful of fixed keys through
//! [`KeyValueStore`]. Backends:
//!
//! | Backend | Where |
//! |---------|-------|
//! | [`MemoryStore`] | tests, demos, ephemeral sessions |
//! | [`FileStore`] | native, feature `fs`, one file per key |
//! | `LocalStorageStore` | browser, in `marketplace-wasm` |
//!
//! Access is single-threaded read-modify-write; no locking is done and
//! concurrent writers from separate processes simply overwrite each other.

pub mod memory;

#[cfg(feature = "fs")]
pub mod fs;

pub use memory::MemoryStore;

#[cfg(feature = "fs")]
pub use fs::FileStore;

use crate::error::Result;

pub trait KeyValueStore {
    /// Raw bytes stored under `key`, or `None` when the key was never set.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replaces the value under `key`.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;

    /// Removes `key`; removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Value under `key` as UTF-8 text.
    fn get_text(&self, key: &str) -> Result<Option<String>> {
        match self.get(key)? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| crate::MarketError::Encoding {
                    key: key.to_string(),
                }),
            None => Ok(None),
        }
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
