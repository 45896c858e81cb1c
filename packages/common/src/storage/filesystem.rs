use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::error::StorageError;
use super::traits::ChallengeStore;
use crate::catalog::{Deployment, Provider};
use crate::challenge::{Challenge, StoredChallenge};
use crate::document::Document;

/// Single-file JSON document store.
///
/// The whole game state lives in one pretty-printed JSON [`Document`]. A
/// missing file reads as [`Document::default_catalog`]; the file is only
/// created by the first write. An unparseable file also lists as the default
/// catalog, but writes and export refuse to touch it. Writes go through a temp file in the same
/// directory followed by a rename, so readers never see a partial document.
pub struct LocalDocumentStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl LocalDocumentStore {
    /// Create a store backed by `path`, creating parent directories.
    pub async fn new(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        self.path
            .with_file_name(format!(".{file_name}.{}.tmp", uuid::Uuid::new_v4()))
    }

    async fn read(&self) -> Result<Document, StorageError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No game document yet, using default catalog");
                Ok(Document::default_catalog())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Like [`read`](Self::read), but an unparseable file yields the default
    /// catalog so the wheels stay usable.
    async fn read_or_default(&self) -> Result<Document, StorageError> {
        match self.read().await {
            Err(StorageError::Serialization(e)) => {
                warn!(path = %self.path.display(), error = %e, "Game document is corrupt, listing default catalog");
                Ok(Document::default_catalog())
            }
            other => other,
        }
    }

    async fn write(&self, document: &Document) -> Result<(), StorageError> {
        let json = document.to_pretty_json()?;
        let temp_path = self.temp_path();

        if let Err(e) = fs::write(&temp_path, json.as_bytes()).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        debug!(
            path = %self.path.display(),
            challenges = document.challenges.len(),
            "Game document saved"
        );
        Ok(())
    }
}

#[async_trait]
impl ChallengeStore for LocalDocumentStore {
    fn backend(&self) -> &'static str {
        "local"
    }

    async fn list_providers(&self) -> Result<Vec<Provider>, StorageError> {
        Ok(self.read_or_default().await?.providers)
    }

    async fn list_deployments(&self) -> Result<Vec<Deployment>, StorageError> {
        Ok(self.read_or_default().await?.deployments)
    }

    async fn list_challenges(&self) -> Result<Vec<Challenge>, StorageError> {
        Ok(self.read_or_default().await?.resolved_challenges())
    }

    async fn create_challenge(
        &self,
        provider_id: &str,
        deployment_id: &str,
    ) -> Result<Option<Challenge>, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read().await?;

        if document.provider(provider_id).is_none() || document.deployment(deployment_id).is_none()
        {
            return Ok(None);
        }

        let stored = StoredChallenge::new(provider_id, deployment_id);
        let challenge = stored.resolve(&document.providers, &document.deployments);
        document.challenges.push(stored);
        self.write(&document).await?;

        Ok(Some(challenge))
    }

    async fn set_challenge_done(
        &self,
        challenge_id: &str,
        done: bool,
    ) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read().await?;

        let Some(challenge) = document.challenge_mut(challenge_id) else {
            return Ok(false);
        };
        challenge.is_done = done;
        self.write(&document).await?;

        Ok(true)
    }

    async fn export_document(&self) -> Result<Document, StorageError> {
        self.read().await
    }

    async fn import_document(&self, document: Document) -> Result<(), StorageError> {
        document.validate()?;
        let _guard = self.write_lock.lock().await;
        self.write(&document).await
    }
}
