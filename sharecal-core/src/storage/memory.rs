use std::collections::HashMap;

use super::KeyValueStore;
use crate::error::ShareCalResult;

/// In-memory storage, mostly for tests
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ShareCalResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> ShareCalResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
