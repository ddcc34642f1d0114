//! Vault token file loading.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Reads the token from a single-line credential file.
///
/// When the file holds several lines the last non-empty one wins.
///
/// # Errors
/// Returns an error if the file is missing, unreadable, or holds no token.
pub fn read_token(path: &Path) -> Result<String> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read Vault token from {}", path.display()))?;

    contents
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .map(ToString::to_string)
        .with_context(|| format!("Vault token file {} is empty", path.display()))
}
