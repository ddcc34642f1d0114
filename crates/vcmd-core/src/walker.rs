//! Recursive key enumeration.
//!
//! Turns the tree rooted at a collection path into the flat, ordered list of
//! leaf paths shown in the keys pane. The walk is lazy and one-shot; callers
//! start a fresh walk on every navigation so the listing reflects the store's
//! current state.

use std::vec;

use tracing::warn;

use crate::store::SecretStore;

struct Frame {
    parent: String,
    children: vec::IntoIter<String>,
}

/// Depth-first iterator over leaf paths, in backend listing order.
///
/// A full path is the plain concatenation of its parent path and child name.
/// A branch whose listing fails contributes no leaves.
pub struct KeyWalker<'a> {
    store: &'a dyn SecretStore,
    pending: Option<String>,
    stack: Vec<Frame>,
}

impl<'a> KeyWalker<'a> {
    pub fn new(store: &'a dyn SecretStore, root: impl Into<String>) -> Self {
        Self {
            store,
            pending: Some(root.into()),
            stack: Vec::new(),
        }
    }

    fn descend(&mut self, path: String) {
        match self.store.list_children(&path) {
            Ok(children) => self.stack.push(Frame {
                parent: path,
                children: children.into_iter(),
            }),
            Err(e) => warn!(path = %path, error = %e, "listing failed; branch skipped"),
        }
    }
}

impl Iterator for KeyWalker<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if let Some(root) = self.pending.take() {
            self.descend(root);
        }

        loop {
            let frame = self.stack.last_mut()?;
            let Some(child) = frame.children.next() else {
                self.stack.pop();
                continue;
            };

            let full = format!("{}{}", frame.parent, child);
            if child.ends_with('/') {
                self.descend(full);
            } else {
                return Some(full);
            }
        }
    }
}

/// Starts a walk of the leaves below `root`.
pub fn expand<'a>(store: &'a dyn SecretStore, root: &str) -> KeyWalker<'a> {
    KeyWalker::new(store, root)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use serde_json::json;

    use super::*;
    use crate::store::{MemoryStore, SecretMap};

    fn secret() -> SecretMap {
        json!({"k": "v"}).as_object().cloned().unwrap()
    }

    #[test]
    fn test_nested_single_leaf() {
        let mut store = MemoryStore::new();
        store.set_listing("kv/", &["app/"]);
        store.set_listing("kv/app/", &["db/"]);
        store.set_listing("kv/app/db/", &["pass"]);

        let keys: Vec<String> = expand(&store, "kv/").collect();
        assert_eq!(keys, ["kv/app/db/pass"]);
    }

    #[test]
    fn test_follows_backend_order_depth_first() {
        let mut store = MemoryStore::new();
        store.set_listing("kv/", &["zeta", "app/", "alpha"]);
        store.set_listing("kv/app/", &["b", "a"]);

        let keys: Vec<String> = expand(&store, "kv/").collect();
        assert_eq!(keys, ["kv/zeta", "kv/app/b", "kv/app/a", "kv/alpha"]);
    }

    #[test]
    fn test_denied_branch_is_pruned() {
        let mut store = MemoryStore::new()
            .with_secret("kv/open/a", secret())
            .with_secret("kv/locked/b", secret())
            .with_secret("kv/c", secret());
        store.deny("kv/locked/");

        let keys: Vec<String> = expand(&store, "kv/").collect();
        assert_eq!(keys, ["kv/c", "kv/open/a"]);
    }

    #[test]
    fn test_denied_root_yields_nothing() {
        let mut store = MemoryStore::new().with_secret("kv/a", secret());
        store.deny("kv/");
        assert_eq!(expand(&store, "kv/").count(), 0);
    }

    #[test]
    fn test_paths_are_not_normalized() {
        let mut store = MemoryStore::new();
        store.set_listing("kv/", &["/"]);
        store.set_listing("kv//", &["x"]);

        let keys: Vec<String> = expand(&store, "kv/").collect();
        assert_eq!(keys, ["kv//x"]);
    }

    #[test]
    fn test_every_leaf_exactly_once() {
        let paths = [
            "kv/a",
            "kv/b/c",
            "kv/b/d/e",
            "kv/b/d/f",
            "kv/g/h",
            "other/x",
        ];
        let mut store = MemoryStore::new();
        for path in paths {
            store.insert(path, secret());
        }

        let keys: Vec<String> = expand(&store, "kv/").collect();
        let unique: BTreeSet<&String> = keys.iter().collect();
        assert_eq!(keys.len(), unique.len());
        assert_eq!(
            unique.into_iter().cloned().collect::<Vec<_>>(),
            ["kv/a", "kv/b/c", "kv/b/d/e", "kv/b/d/f", "kv/g/h"]
        );
    }

    #[test]
    fn test_walk_is_lazy() {
        let mut store = MemoryStore::new();
        store.set_listing("kv/", &["a", "b/"]);
        store.set_listing("kv/b/", &["c"]);

        let mut walker = expand(&store, "kv/");
        assert_eq!(store.counts().lists, 0);
        assert_eq!(walker.next().as_deref(), Some("kv/a"));
        assert_eq!(store.counts().lists, 1);
        assert_eq!(walker.next().as_deref(), Some("kv/b/c"));
        assert_eq!(store.counts().lists, 2);
        assert_eq!(walker.next(), None);
    }
}
