//! Process-local key-value store.
//!
//! Clones share one map, so several repositories built from clones of the
//! same store observe each other's writes.

use super::{check_key, KeyValueStore, StoreResult};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// In-memory store backed by a shared `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        check_key(key)?;
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        check_key(key)?;
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::store::{KeyValueStore, StoreError};

    #[test]
    fn clones_share_slots() {
        let first = MemoryStore::new();
        let second = first.clone();

        first.set("courses", "[]").unwrap();
        assert_eq!(second.get("courses").unwrap().as_deref(), Some("[]"));
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn rejects_blank_keys() {
        let store = MemoryStore::new();
        assert!(matches!(store.get(""), Err(StoreError::InvalidKey(_))));
        assert!(matches!(store.set(" courses", "[]"), Err(StoreError::InvalidKey(_))));
        assert!(store.is_empty());
    }
}
