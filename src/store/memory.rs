use std::cell::RefCell;
use std::collections::HashMap;

use crate::store::{KeyValueStore, StoreError, check_key};

/// Process-local store. Nothing survives the process; used by tests and
/// `--ephemeral` runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        check_key(key)?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        check_key(key)?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        check_key(key)?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(store.len(), 1);

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_usable_through_reference_and_box() {
        let store = MemoryStore::new();
        {
            let by_ref: &dyn KeyValueStore = &store;
            by_ref.set("a", "1").unwrap();
        }
        let boxed: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        boxed.set("b", "2").unwrap();
        assert_eq!(boxed.get("b").unwrap().as_deref(), Some("2"));
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    }
}
