//! File-based credential store adapter.
//!
//! Tokens are kept in a small JSON document, by default at
//! `~/.eventmap/credentials.json`. Each write replaces the whole file
//! through a temporary sibling and a rename.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::traits::{CredentialStore, CredentialsError, TokenKey};

/// The credentials directory name.
const CREDENTIALS_DIR: &str = ".eventmap";

/// The credentials file name.
const CREDENTIALS_FILE: &str = "credentials.json";

type Document = BTreeMap<String, String>;

/// File-based credential store.
///
/// # Example
///
/// ```ignore
/// use eventmap::adapters::FileCredentialStore;
/// use eventmap::traits::{CredentialStore, TokenKey};
///
/// let store = FileCredentialStore::new()?;
/// store.set(TokenKey::Access, "A1").await?;
/// assert_eq!(store.get(TokenKey::Access).await?, Some("A1".to_string()));
/// ```
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles on the document.
    write_lock: Mutex<()>,
}

impl FileCredentialStore {
    /// Create a store at the default location under the home directory.
    ///
    /// # Returns
    /// The store, or an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, CredentialsError> {
        let home = dirs::home_dir().ok_or_else(|| {
            CredentialsError::Other("Failed to determine home directory".to_string())
        })?;
        Ok(Self::with_path(
            home.join(CREDENTIALS_DIR).join(CREDENTIALS_FILE),
        ))
    }

    /// Create a store backed by an explicit file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Get the path to the credentials file.
    pub fn credentials_path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Document, CredentialsError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => return Err(CredentialsError::LoadFailed(e.to_string())),
        };

        if bytes.is_empty() {
            return Ok(Document::new());
        }

        serde_json::from_slice(&bytes).map_err(|e| CredentialsError::Serialization(e.to_string()))
    }

    async fn write_document(&self, document: &Document) -> Result<(), CredentialsError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CredentialsError::Io(e.to_string()))?;
        }

        let json = serde_json::to_vec_pretty(document)
            .map_err(|e| CredentialsError::Serialization(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| CredentialsError::SaveFailed(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| CredentialsError::SaveFailed(e.to_string()))
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: TokenKey) -> Result<Option<String>, CredentialsError> {
        let document = self.read_document().await?;
        Ok(document.get(key.as_str()).cloned())
    }

    async fn set(&self, key: TokenKey, value: &str) -> Result<(), CredentialsError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document().await?;
        document.insert(key.as_str().to_string(), value.to_string());
        self.write_document(&document).await
    }

    async fn remove(&self, key: TokenKey) -> Result<(), CredentialsError> {
        let _guard = self.write_lock.lock().await;
        let mut document = match self.read_document().await {
            Ok(document) => document,
            // An unreadable file cannot hold a usable token; start clean.
            Err(CredentialsError::Serialization(_)) => Document::new(),
            Err(e) => return Err(e),
        };

        if document.remove(key.as_str()).is_none() && !document.is_empty() {
            return Ok(());
        }

        if document.is_empty() {
            return match tokio::fs::remove_file(&self.path).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(CredentialsError::ClearFailed(e.to_string())),
            };
        }

        self.write_document(&document).await
    }
}
