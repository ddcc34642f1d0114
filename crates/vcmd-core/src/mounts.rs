//! Mount eligibility.

use tracing::{debug, warn};

use crate::store::{SecretStore, StoreResult};

/// Returns the names of mounts the browser can show, sorted.
///
/// A mount is eligible when its type is in `allowed` and listing its root
/// succeeds.
///
/// # Errors
/// Returns an error only if the mount table itself cannot be read.
pub fn eligible_mounts(store: &dyn SecretStore, allowed: &[String]) -> StoreResult<Vec<String>> {
    let mounts = store.list_mounts()?;

    let mut eligible: Vec<String> = mounts
        .into_iter()
        .filter(|(name, info)| {
            if !allowed.iter().any(|kind| *kind == info.kind) {
                debug!(mount = %name, kind = %info.kind, "skipping mount type");
                return false;
            }
            match store.list_children(name) {
                Ok(_) => true,
                Err(e) => {
                    warn!(mount = %name, error = %e, "mount root is not listable");
                    false
                }
            }
        })
        .map(|(name, _)| name)
        .collect();

    eligible.sort();
    Ok(eligible)
}
