//! Key-value persistence port for the session.
//!
//! Backends:
//! - `MemoryStore` - process-local map, used in tests and with `STORE_BACKEND=memory`
//! - `FileStore` - one JSON file per key under `DATA_DIR` (default)

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Current resume document.
pub const RESUME_KEY: &str = "resumeBuilderData";
/// Resume document written by the first version of the builder. Read only.
pub const LEGACY_RESUME_KEY: &str = "ai-resume-data";
pub const TEMPLATE_KEY: &str = "resumeBuilderTemplate";
pub const PROOF_KEY: &str = "ai-resume-proof";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error on '{key}': {source}")]
    Serde {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    async fn set(&self, key: &str, value: &Value) -> Result<(), StoreError>;

    /// Backend name for logs.
    fn backend_name(&self) -> &'static str;
}

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys map to file names; anything outside `[A-Za-z0-9_-]` becomes `_`.
    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    /// A file that exists but does not hold valid JSON reads as absent.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let path = self.path_for(key);
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    key: key.to_string(),
                    source,
                })
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Ignoring unreadable stored value at {}: {e}", path.display());
                Ok(None)
            }
        }
    }

    /// Writes to a sibling temp file and renames it over the target.
    async fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };
        let body = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Serde {
            key: key.to_string(),
            source,
        })?;

        tokio::fs::create_dir_all(&self.dir).await.map_err(io_err)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, &path).await.map_err(io_err)?;

        debug!("Wrote {}", path.display());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
