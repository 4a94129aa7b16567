use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage};
use memora_core::{PersistentStore, StoreError};
use serde_json::Value;

/// Browser localStorage behind the core's store interface.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct LocalStore;

fn to_store_error(err: StorageError) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

impl PersistentStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        match LocalStorage::get::<Value>(key) {
            Ok(value) => Ok(Some(value)),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(err) => Err(to_store_error(err)),
        }
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        LocalStorage::set(key, value).map_err(to_store_error)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        LocalStorage::delete(key);
        Ok(())
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use memora_core::{BestTimes, PersistentStoreExt, RankingService, StorageKey};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn ranking_persists_in_local_storage() {
        let mut store = LocalStore;
        store.clear::<BestTimes>().unwrap();

        let mut ranking = RankingService::new(LocalStore);
        ranking.record_time(33).unwrap();

        assert_eq!(RankingService::new(LocalStore).best_times().as_slice(), [33]);
        ranking.reset().unwrap();
        assert_eq!(store.get(BestTimes::KEY).unwrap(), None);
    }
}
