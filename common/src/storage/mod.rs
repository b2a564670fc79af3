mod error;
mod json;
mod key_value_store;

pub use error::StoreError;
pub use json::{load_json, save_json};
pub use key_value_store::{FileKeyValueStore, InMemoryStore, KeyValueStore};
