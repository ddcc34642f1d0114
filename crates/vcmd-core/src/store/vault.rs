//! Vault HTTP backend.
//!
//! `VaultClient` speaks the Vault logical API over `reqwest`. `VaultStore`
//! drives it on a private current-thread runtime so the UI sees plain
//! blocking calls.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::Context;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use super::{MountInfo, SecretMap, SecretStore, StoreError, StoreResult};

const TOKEN_HEADER: &str = "X-Vault-Token";

/// Async Vault API client.
#[derive(Debug, Clone)]
pub struct VaultClient {
    base_url: String,
    token: String,
    http: reqwest::Client,
}

impl VaultClient {
    /// Creates a client for `addr` authenticating with `token`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(addr: &str, token: impl Into<String>, timeout: Option<Duration>) -> StoreResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: addr.trim_end_matches('/').to_string(),
            token: token.into(),
            http,
        })
    }

    /// Paths are appended verbatim; no slash normalization happens here.
    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.base_url, path)
    }

    /// Lists mounts as name -> info.
    pub async fn list_mounts(&self) -> StoreResult<BTreeMap<String, MountInfo>> {
        let response = self.send(self.http.get(self.url("sys/mounts"))).await?;
        let body = check(response, "sys/mounts").await?;
        Ok(parse_mounts(&body))
    }

    /// Lists the children of `path`. A 404 means "nothing here".
    pub async fn list(&self, path: &str) -> StoreResult<Vec<String>> {
        let url = format!("{}?list=true", self.url(path));
        let response = self.send(self.http.get(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let body = check(response, path).await?;
        let keys = body
            .get("data")
            .and_then(|data| data.get("keys"))
            .and_then(Value::as_array)
            .map(|keys| {
                keys.iter()
                    .filter_map(Value::as_str)
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Ok(keys)
    }

    /// Reads the secret at `path`.
    pub async fn read(&self, path: &str) -> StoreResult<SecretMap> {
        let response = self.send(self.http.get(self.url(path))).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound {
                path: path.to_string(),
            });
        }
        let body = check(response, path).await?;
        match body.get("data") {
            Some(Value::Object(data)) => Ok(data.clone()),
            Some(Value::Null) | None => Ok(SecretMap::new()),
            Some(other) => Err(StoreError::Decode(format!(
                "data at {path} is not an object: {other}"
            ))),
        }
    }

    /// Writes `value` to `path`.
    pub async fn write(&self, path: &str, value: &SecretMap) -> StoreResult<()> {
        let response = self
            .send(self.http.post(self.url(path)).json(value))
            .await?;
        check(response, path).await.map(|_| ())
    }

    /// Deletes the secret at `path`.
    pub async fn delete(&self, path: &str) -> StoreResult<()> {
        let response = self.send(self.http.delete(self.url(path))).await?;
        check(response, path).await.map(|_| ())
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> StoreResult<reqwest::Response> {
        request
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))
    }
}

/// Maps non-success statuses to errors and decodes the JSON body.
///
/// Empty bodies (204) decode to `Value::Null`.
async fn check(response: reqwest::Response, path: &str) -> StoreResult<Value> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| StoreError::Transport(e.to_string()))?;

    if !status.is_success() {
        let message = error_message(&text).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
        return Err(match status {
            StatusCode::NOT_FOUND => StoreError::NotFound {
                path: path.to_string(),
            },
            StatusCode::FORBIDDEN => StoreError::AccessDenied {
                path: path.to_string(),
                message,
            },
            _ => StoreError::Status {
                status: status.as_u16(),
                message,
            },
        });
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| StoreError::Decode(e.to_string()))
}

/// Extracts `{"errors": [...]}` messages from a Vault error body.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let errors: Vec<&str> = value
        .get("errors")?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .collect();
    (!errors.is_empty()).then(|| errors.join("; "))
}

/// Accepts both the `data` envelope and the legacy top-level mount table.
fn parse_mounts(body: &Value) -> BTreeMap<String, MountInfo> {
    let table = body
        .get("data")
        .filter(|data| data.is_object())
        .unwrap_or(body);

    table
        .as_object()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|(name, entry)| {
                    let kind = entry.get("type")?.as_str()?;
                    Some((name.clone(), MountInfo::new(kind)))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Blocking [`SecretStore`] over a [`VaultClient`].
pub struct VaultStore {
    client: VaultClient,
    runtime: tokio::runtime::Runtime,
}

impl VaultStore {
    /// Wraps `client` with its own current-thread runtime.
    ///
    /// # Errors
    /// Returns an error if the runtime cannot be created.
    pub fn new(client: VaultClient) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("create store runtime")?;
        Ok(Self { client, runtime })
    }
}

impl SecretStore for VaultStore {
    fn list_mounts(&self) -> StoreResult<BTreeMap<String, MountInfo>> {
        debug!("list mounts");
        self.runtime.block_on(self.client.list_mounts())
    }

    fn list_children(&self, path: &str) -> StoreResult<Vec<String>> {
        debug!(path, "list");
        self.runtime.block_on(self.client.list(path))
    }

    fn read_value(&self, path: &str) -> StoreResult<SecretMap> {
        debug!(path, "read");
        self.runtime.block_on(self.client.read(path))
    }

    fn write_value(&mut self, path: &str, value: &SecretMap) -> StoreResult<()> {
        debug!(path, "write");
        self.runtime.block_on(self.client.write(path, value))
    }

    fn delete_value(&mut self, path: &str) -> StoreResult<()> {
        debug!(path, "delete");
        self.runtime.block_on(self.client.delete(path))
    }
}
