//! In-memory secret store.

use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};

use super::{MountInfo, SecretMap, SecretStore, StoreError, StoreResult};

/// Number of calls made against a [`MemoryStore`], by operation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CallCounts {
    pub lists: usize,
    pub reads: usize,
    pub writes: usize,
    pub deletes: usize,
}

/// A store backed by ordered maps.
///
/// Listings are derived from the stored leaf paths unless an explicit
/// listing was registered for a path with [`MemoryStore::set_listing`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    mounts: BTreeMap<String, MountInfo>,
    secrets: BTreeMap<String, SecretMap>,
    listings: BTreeMap<String, Vec<String>>,
    denied: BTreeSet<String>,
    fail_writes: bool,
    fail_deletes: bool,
    counts: Cell<CallCounts>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_mount(mut self, name: &str, kind: &str) -> Self {
        self.mounts.insert(name.to_string(), MountInfo::new(kind));
        self
    }

    #[must_use]
    pub fn with_secret(mut self, path: &str, value: SecretMap) -> Self {
        self.secrets.insert(path.to_string(), value);
        self
    }

    /// Stores `value` at `path` without counting it as a client write.
    pub fn insert(&mut self, path: &str, value: SecretMap) {
        self.secrets.insert(path.to_string(), value);
    }

    /// Overrides the listing returned for `path`.
    pub fn set_listing(&mut self, path: &str, children: &[&str]) {
        self.listings.insert(
            path.to_string(),
            children.iter().map(ToString::to_string).collect(),
        );
    }

    /// Makes every operation on `path` fail with `AccessDenied`.
    pub fn deny(&mut self, path: &str) {
        self.denied.insert(path.to_string());
    }

    /// Makes subsequent writes fail with a server error.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Makes subsequent deletes fail with a server error.
    pub fn fail_deletes(&mut self, fail: bool) {
        self.fail_deletes = fail;
    }

    pub fn get(&self, path: &str) -> Option<&SecretMap> {
        self.secrets.get(path)
    }

    pub fn counts(&self) -> CallCounts {
        self.counts.get()
    }

    fn bump(&self, f: impl FnOnce(&mut CallCounts)) {
        let mut counts = self.counts.get();
        f(&mut counts);
        self.counts.set(counts);
    }

    fn check_access(&self, path: &str) -> StoreResult<()> {
        if self.denied.contains(path) {
            return Err(StoreError::AccessDenied {
                path: path.to_string(),
                message: "permission denied".to_string(),
            });
        }
        Ok(())
    }

    fn derived_children(&self, path: &str) -> Vec<String> {
        let mut children: Vec<String> = Vec::new();
        for key in self.secrets.keys() {
            let Some(rest) = key.strip_prefix(path) else {
                continue;
            };
            if rest.is_empty() {
                continue;
            }
            let child = match rest.find('/') {
                Some(idx) => &rest[..=idx],
                None => rest,
            };
            if !children.iter().any(|c| c == child) {
                children.push(child.to_string());
            }
        }
        children
    }
}

fn server_error() -> StoreError {
    StoreError::Status {
        status: 500,
        message: "internal error".to_string(),
    }
}

impl SecretStore for MemoryStore {
    fn list_mounts(&self) -> StoreResult<BTreeMap<String, MountInfo>> {
        Ok(self.mounts.clone())
    }

    fn list_children(&self, path: &str) -> StoreResult<Vec<String>> {
        self.bump(|c| c.lists += 1);
        self.check_access(path)?;
        if let Some(children) = self.listings.get(path) {
            return Ok(children.clone());
        }
        Ok(self.derived_children(path))
    }

    fn read_value(&self, path: &str) -> StoreResult<SecretMap> {
        self.bump(|c| c.reads += 1);
        self.check_access(path)?;
        self.secrets
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                path: path.to_string(),
            })
    }

    fn write_value(&mut self, path: &str, value: &SecretMap) -> StoreResult<()> {
        self.bump(|c| c.writes += 1);
        self.check_access(path)?;
        if self.fail_writes {
            return Err(server_error());
        }
        self.secrets.insert(path.to_string(), value.clone());
        Ok(())
    }

    fn delete_value(&mut self, path: &str) -> StoreResult<()> {
        self.bump(|c| c.deletes += 1);
        self.check_access(path)?;
        if self.fail_deletes {
            return Err(server_error());
        }
        self.secrets.remove(path);
        Ok(())
    }
}
