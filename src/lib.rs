//! Mini Cache - An in-process key-value cache
//!
//! Pluggable backing storage, LRU or LFU eviction and optional lazy TTL
//! expiration behind one `get`/`put` API.

pub mod cache;
pub mod config;
pub mod error;
pub mod shared;

pub use cache::{Cache, EvictionPolicy, LfuPolicy, LruPolicy, MemoryStore, Store};
pub use config::{Config, PolicyKind};
pub use error::{CacheError, Result};
pub use shared::SharedCache;
