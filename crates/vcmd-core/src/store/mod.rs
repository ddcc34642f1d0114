//! Secret store collaborator.
//!
//! The UI consumes the store only through [`SecretStore`]. Every call is
//! synchronous: it blocks the caller until the backend answers.
//!
//! - `vault.rs`: HTTP client for a Vault server plus its blocking adapter
//! - `memory.rs`: in-process store used by the test-suites

mod memory;
mod vault;

use std::collections::BTreeMap;

pub use memory::{CallCounts, MemoryStore};
pub use vault::{VaultClient, VaultStore};

/// A secret's structured contents: a flat string-keyed map of JSON values.
pub type SecretMap = serde_json::Map<String, serde_json::Value>;

/// A mount as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountInfo {
    /// Declared backend type (`generic`, `kv`, `cubbyhole`, `pki`, ...).
    pub kind: String,
}

impl MountInfo {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

/// Store-level failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no secret at {path}")]
    NotFound { path: String },

    #[error("permission denied on {path}: {message}")]
    AccessDenied { path: String, message: String },

    #[error("vault returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read/write/list/delete access to a path-addressed secret store.
///
/// Paths are `/`-delimited; a child name ending in `/` denotes a collection.
pub trait SecretStore {
    /// Returns mount name (with trailing `/`) to mount info.
    fn list_mounts(&self) -> StoreResult<BTreeMap<String, MountInfo>>;

    /// Returns the immediate children of `path` in backend order.
    ///
    /// A path without children yields an empty list, not an error.
    fn list_children(&self, path: &str) -> StoreResult<Vec<String>>;

    fn read_value(&self, path: &str) -> StoreResult<SecretMap>;

    fn write_value(&mut self, path: &str, value: &SecretMap) -> StoreResult<()>;

    fn delete_value(&mut self, path: &str) -> StoreResult<()>;
}
