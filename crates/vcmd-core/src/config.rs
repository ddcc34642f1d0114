//! Configuration management for vcmd.
//!
//! Loads configuration from ${VCMD_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod paths {
    //! Path resolution for vcmd configuration and data files.
    //!
    //! VCMD_HOME resolution order:
    //! 1. VCMD_HOME environment variable (if set)
    //! 2. ~/.config/vcmd (default)

    use std::path::PathBuf;

    /// Returns the vcmd home directory.
    pub fn vcmd_home() -> PathBuf {
        if let Ok(home) = std::env::var("VCMD_HOME") {
            return PathBuf::from(home);
        }

        home_dir().join(".config").join("vcmd")
    }

    /// Returns the user's home directory, or `.` when it cannot be determined.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        vcmd_home().join("config.toml")
    }

    /// Returns the default diagnostic log file path.
    pub fn log_path() -> PathBuf {
        vcmd_home().join("vcmd.log")
    }

    /// Returns the default location of the Vault token file.
    pub fn default_token_path() -> PathBuf {
        home_dir().join(".vault-token")
    }
}

/// External editor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Editor command. Falls back to `$VISUAL`, `$EDITOR`, then `vim`.
    pub command: Option<String>,
    /// Treat an editor session that leaves the file untouched as fatal.
    pub fail_on_unmodified: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            command: None,
            fail_on_unmodified: true,
        }
    }
}

impl EditorConfig {
    /// Resolves the editor command from config and environment.
    pub fn resolve_command(&self) -> String {
        self.command
            .clone()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| std::env::var("VISUAL").ok().filter(|v| !v.trim().is_empty()))
            .or_else(|| std::env::var("EDITOR").ok().filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| "vim".to_string())
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address of the Vault server.
    pub vault_addr: String,

    /// Path of the single-line token file (default: ~/.vault-token).
    pub token_file: Option<PathBuf>,

    /// Mount types shown in the mount list.
    pub allowed_mount_types: Vec<String>,

    /// Diagnostic log file (default: ${VCMD_HOME}/vcmd.log).
    pub log_file: Option<PathBuf>,

    /// HTTP request timeout in seconds (default 0: wait until the server answers).
    pub request_timeout_secs: u64,

    /// External editor settings.
    pub editor: EditorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vault_addr: Self::DEFAULT_VAULT_ADDR.to_string(),
            token_file: None,
            allowed_mount_types: Self::DEFAULT_MOUNT_TYPES
                .iter()
                .map(ToString::to_string)
                .collect(),
            log_file: None,
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            editor: EditorConfig::default(),
        }
    }
}

impl Config {
    const DEFAULT_VAULT_ADDR: &str = "https://127.0.0.1:8200";
    const DEFAULT_MOUNT_TYPES: &[&str] = &["generic", "kv", "cubbyhole"];
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 0;

    /// Loads configuration from the default config path, then applies
    /// environment overrides.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Applies `VAULT_ADDR` on top of the file configuration.
    pub fn apply_env(&mut self) {
        if let Ok(addr) = std::env::var("VAULT_ADDR")
            && !addr.trim().is_empty()
        {
            self.vault_addr = addr.trim().to_string();
        }
    }

    /// Checks that the Vault address is a usable base URL.
    ///
    /// # Errors
    /// Returns an error if `vault_addr` is not an http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.vault_addr)
            .with_context(|| format!("Invalid vault_addr '{}'", self.vault_addr))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!(
                "Invalid vault_addr '{}': scheme must be http or https",
                self.vault_addr
            );
        }
        Ok(())
    }

    /// Returns the token file path, falling back to ~/.vault-token.
    pub fn token_path(&self) -> PathBuf {
        self.token_file
            .clone()
            .unwrap_or_else(paths::default_token_path)
    }

    /// Returns the diagnostic log path.
    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(paths::log_path)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.request_timeout_secs))
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    ///
    /// # Errors
    /// Returns an error if the file exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

/// Returns the commented default config template.
pub fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.vault_addr, "https://127.0.0.1:8200");
        assert_eq!(config.allowed_mount_types, ["generic", "kv", "cubbyhole"]);
        assert!(config.editor.fail_on_unmodified);
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "vault_addr = \"http://vault.local:8200\"\n[editor]\ncommand = \"nano\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.vault_addr, "http://vault.local:8200");
        assert_eq!(config.editor.command.as_deref(), Some("nano"));
        assert!(config.editor.fail_on_unmodified);
        assert_eq!(config.request_timeout_secs, 0);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "vault_addr = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_scheme() {
        let config = Config {
            vault_addr: "ftp://vault".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_template_parses() {
        let config: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(config.vault_addr, "https://127.0.0.1:8200");
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_init_creates_file_and_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::init(&path).unwrap();
        assert!(path.exists());
        assert!(Config::init(&path).is_err());
    }

    #[test]
    fn test_timeout_is_opt_in() {
        assert_eq!(Config::default().request_timeout(), None);

        let config = Config {
            request_timeout_secs: 15,
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_editor_command_prefers_config() {
        let editor = EditorConfig {
            command: Some("hx".to_string()),
            fail_on_unmodified: true,
        };
        assert_eq!(editor.resolve_command(), "hx");
    }
}
