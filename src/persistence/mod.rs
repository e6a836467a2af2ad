//! Key-value persistence
//!
//! Features:
//! - `KeyValueStore` trait: string keys to string values
//! - In-memory store for native builds and tests
//! - LocalStorage store on web

pub mod store;

pub use store::{KeyValueStore, MemoryStore, StorageError};

#[cfg(target_arch = "wasm32")]
pub use store::LocalStore;
