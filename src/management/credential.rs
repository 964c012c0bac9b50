use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{config, error::StoreError, types::TokenRecord};

/// A cell holding the token record of one user.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self) -> Result<Option<TokenRecord>, StoreError>;
    async fn set(&self, record: TokenRecord) -> Result<(), StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;
}

/// In-process store, one per web session.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    record: RwLock<Option<TokenRecord>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: TokenRecord) -> Self {
        Self {
            record: RwLock::new(Some(record)),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self) -> Result<Option<TokenRecord>, StoreError> {
        Ok(self.record.read().await.clone())
    }

    async fn set(&self, record: TokenRecord) -> Result<(), StoreError> {
        *self.record.write().await = Some(record);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.record.write().await = None;
        Ok(())
    }
}

/// JSON file store used by the command line.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_path() -> PathBuf {
        config::data_dir().join("cache/token.json")
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Default for FileCredentialStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self) -> Result<Option<TokenRecord>, StoreError> {
        let content = match async_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    async fn set(&self, record: TokenRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&record)?;
        // write then rename so a reader never sees half a record
        let tmp = self.path.with_extension("json.tmp");
        async_fs::write(&tmp, json).await?;
        async_fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match async_fs::remove_file(&self.path).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
