use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{KeyValueStore, StoreError};

pub fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(content) = store.get(key)? else {
        return Ok(None);
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| StoreError::Json {
            key: key.to_string(),
            source,
        })
}

pub fn save_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let content = serde_json::to_string(value).map_err(|source| StoreError::Json {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;

    #[test]
    fn test_missing_key_loads_none() {
        let store = InMemoryStore::new();
        let value: Option<u32> = load_json(&store, "absent").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_corrupt_value_reports_key() {
        let store = InMemoryStore::new();
        store.set("2048BestScore", "not a number").unwrap();

        let err = load_json::<u32, _>(&store, "2048BestScore").unwrap_err();

        assert!(matches!(err, StoreError::Json { ref key, .. } if key == "2048BestScore"));
    }
}
