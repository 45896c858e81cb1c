use async_trait::async_trait;

use super::error::StorageError;
use crate::catalog::{Deployment, Provider};
use crate::challenge::Challenge;
use crate::document::Document;

/// Persistent home of the provider and deployment catalogs and of every
/// challenge attempt.
///
/// Implementations must be interchangeable: the game logic only ever talks
/// to this trait.
#[async_trait]
pub trait ChallengeStore: Send + Sync {
    /// Human-readable backend name for diagnostics.
    fn backend(&self) -> &'static str;

    async fn list_providers(&self) -> Result<Vec<Provider>, StorageError>;

    async fn list_deployments(&self) -> Result<Vec<Deployment>, StorageError>;

    /// All challenges, oldest first, with references resolved to names.
    async fn list_challenges(&self) -> Result<Vec<Challenge>, StorageError>;

    /// Persist a new attempt with `is_done = false`.
    ///
    /// Returns `Ok(None)` if either id does not exist in the catalog.
    async fn create_challenge(
        &self,
        provider_id: &str,
        deployment_id: &str,
    ) -> Result<Option<Challenge>, StorageError>;

    /// Set the completion flag of a challenge.
    ///
    /// Returns `Ok(false)` if the challenge does not exist.
    async fn set_challenge_done(&self, challenge_id: &str, done: bool)
    -> Result<bool, StorageError>;

    /// Snapshot the full persisted state.
    async fn export_document(&self) -> Result<Document, StorageError>;

    /// Replace the full persisted state with `document`.
    async fn import_document(&self, document: Document) -> Result<(), StorageError>;
}
