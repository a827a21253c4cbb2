//! Cache Module
//!
//! Provides an in-process cache with pluggable storage, LRU/LFU eviction and
//! lazy TTL expiration.

mod clock;
mod engine;
mod lfu;
mod list;
mod lru;
mod policy;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{Cache, DynPolicy};
pub use lfu::LfuPolicy;
pub use list::{NodeId, RecencyList};
pub use lru::LruPolicy;
pub use policy::EvictionPolicy;
pub use stats::CacheStats;
pub use store::{MemoryStore, Rejected, Store};
