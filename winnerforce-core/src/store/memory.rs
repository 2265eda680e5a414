use std::collections::HashMap;

use crate::error::WinnerforceResult;
use crate::store::KeyValueStore;

/// In-process store, lost when dropped
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> WinnerforceResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> WinnerforceResult<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
