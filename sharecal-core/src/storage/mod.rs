//! Local persistent key-value storage.
//!
//! The store only ever needs "read a string" and "write a string" under a
//! namespaced key, so that is all this trait asks for.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::ShareCalResult;

pub trait KeyValueStore {
    /// Value under `key`, or `None` if nothing was ever written
    fn get(&self, key: &str) -> ShareCalResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> ShareCalResult<()>;
}
