use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::*;

/// Key-value persistence substrate holding JSON values.
pub trait PersistentStore {
    fn get(&self, key: &str) -> core::result::Result<Option<Value>, StoreError>;
    fn set(&mut self, key: &str, value: Value) -> core::result::Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> core::result::Result<(), StoreError>;
}

/// Types persisted under a fixed key.
pub trait StorageKey {
    const KEY: &'static str;
}

/// Typed access on top of [`PersistentStore`].
pub trait PersistentStoreExt: PersistentStore {
    /// Loads the record for `T`, `None` when absent.
    fn load<T>(&self) -> core::result::Result<Option<T>, StoreError>
    where
        T: StorageKey + DeserializeOwned,
    {
        match self.get(T::KEY)? {
            None => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|_| StoreError::Malformed { key: T::KEY }),
        }
    }

    /// Like [`PersistentStoreExt::load`] but falls back to the default, logging why.
    fn load_or_default<T>(&self) -> T
    where
        T: StorageKey + DeserializeOwned + Default,
    {
        match self.load::<T>() {
            Ok(value) => value.unwrap_or_default(),
            Err(err) => {
                log::warn!("{}, using default", err);
                T::default()
            }
        }
    }

    fn save<T>(&mut self, value: &T) -> core::result::Result<(), StoreError>
    where
        T: StorageKey + Serialize,
    {
        let value =
            serde_json::to_value(value).map_err(|_| StoreError::Malformed { key: T::KEY })?;
        self.set(T::KEY, value)
    }

    fn clear<T: StorageKey>(&mut self) -> core::result::Result<(), StoreError> {
        self.remove(T::KEY)
    }
}

impl<S: PersistentStore + ?Sized> PersistentStoreExt for S {}

impl<S: PersistentStore + ?Sized> PersistentStore for &mut S {
    fn get(&self, key: &str) -> core::result::Result<Option<Value>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> core::result::Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> core::result::Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Store kept in memory, for hosts without durable storage and for tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PersistentStore for MemoryStore {
    fn get(&self, key: &str) -> core::result::Result<Option<Value>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> core::result::Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> core::result::Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}
