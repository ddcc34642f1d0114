//! Core library for vcmd: configuration, credentials, logging, and access to
//! the hierarchical secret store.

pub mod config;
pub mod logging;
pub mod mounts;
pub mod store;
pub mod token;
pub mod walker;

pub use store::{MountInfo, SecretMap, SecretStore, StoreError};
pub use walker::{KeyWalker, expand};
