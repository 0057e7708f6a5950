//! Durable key/value storage for client-side state.
//!
//! The portal keeps a handful of string entries (the persisted session)
//! across process restarts. Multi-key writes go through a single
//! [`KeyValueStore::set_many`] call so an implementation can make them
//! all-or-nothing.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::CoreError;
use async_trait::async_trait;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Write every entry, or none of them.
    async fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), CoreError>;

    /// Remove every listed key. Missing keys are not an error.
    async fn remove_many(&self, keys: &[&str]) -> Result<(), CoreError>;

    async fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<String>>, CoreError> {
        let mut values = Vec::with_capacity(keys.len());
        for key in keys {
            values.push(self.get(key).await?);
        }
        Ok(values)
    }
}
