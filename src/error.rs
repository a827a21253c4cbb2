//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for stores, eviction policies and the cache itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key not found in the store or cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Key existed but its TTL has elapsed
    #[error("Key expired: {0}")]
    Expired(String),

    /// Store is at capacity and the key is new
    #[error("Cache full: {0}")]
    CacheFull(String),

    /// Eviction was requested from a policy tracking no keys
    #[error("No keys to evict")]
    EmptyPolicy,

    /// Removal was requested for a key the policy does not track
    #[error("Key not tracked by eviction policy: {0}")]
    UntrackedKey(String),

    /// Configuration value could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CacheError {
    /// Returns true for errors that can only come from a store/policy desync.
    ///
    /// These are never produced by a correctly behaving cache and signal a bug
    /// in a `Store` or `EvictionPolicy` implementation.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, CacheError::EmptyPolicy | CacheError::UntrackedKey(_))
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
