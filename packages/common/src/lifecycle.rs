use std::sync::Arc;

use tracing::{error, info, warn};

use crate::catalog::{Deployment, Provider, default_providers};
use crate::challenge::Challenge;
use crate::document::Document;
use crate::storage::ChallengeStore;

/// Outcome of flipping a challenge's completion flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The flag was flipped and persisted; carries the new value.
    Toggled(bool),
    /// No challenge with that id exists.
    Missing,
    /// The store could not be read or written; nothing changed.
    Failed,
}

impl ToggleOutcome {
    /// The new completion state, if the toggle went through.
    pub fn new_state(self) -> Option<bool> {
        match self {
            Self::Toggled(done) => Some(done),
            Self::Missing | Self::Failed => None,
        }
    }
}

/// Game-facing access to a [`ChallengeStore`].
///
/// Store errors never reach callers: reads degrade to a safe default
/// (the built-in provider list or an empty list) and writes report `None` or
/// `false`. Every degradation is logged.
#[derive(Clone)]
pub struct ChallengeService {
    store: Arc<dyn ChallengeStore>,
}

impl ChallengeService {
    pub fn new(store: Arc<dyn ChallengeStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ChallengeStore> {
        &self.store
    }

    /// Providers for the wheel, or the built-in list when the store fails.
    pub async fn providers(&self) -> Vec<Provider> {
        match self.store.list_providers().await {
            Ok(providers) => providers,
            Err(e) => {
                warn!(backend = self.store.backend(), error = %e, "Failed to fetch providers, using defaults");
                default_providers()
            }
        }
    }

    pub async fn deployments(&self) -> Vec<Deployment> {
        match self.store.list_deployments().await {
            Ok(deployments) => deployments,
            Err(e) => {
                warn!(backend = self.store.backend(), error = %e, "Failed to fetch deployments");
                Vec::new()
            }
        }
    }

    pub async fn challenges(&self) -> Vec<Challenge> {
        match self.store.list_challenges().await {
            Ok(challenges) => challenges,
            Err(e) => {
                warn!(backend = self.store.backend(), error = %e, "Failed to fetch challenges");
                Vec::new()
            }
        }
    }

    /// Record a new attempt of `deployment_id` on `provider_id`.
    ///
    /// `None` when either id is unknown or the write failed.
    pub async fn start_challenge(&self, provider_id: &str, deployment_id: &str) -> Option<Challenge> {
        match self.store.create_challenge(provider_id, deployment_id).await {
            Ok(Some(challenge)) => {
                info!(
                    challenge_id = %challenge.id,
                    provider = %challenge.provider_name,
                    deployment = %challenge.deployment_name,
                    "New challenge created"
                );
                Some(challenge)
            }
            Ok(None) => {
                warn!(provider_id, deployment_id, "Cannot create challenge for unknown provider or deployment");
                None
            }
            Err(e) => {
                error!(provider_id, deployment_id, error = %e, "Failed to create challenge");
                None
            }
        }
    }

    /// Set the completion flag. `false` when the challenge is missing or the
    /// write failed.
    pub async fn set_done(&self, challenge_id: &str, done: bool) -> bool {
        match self.store.set_challenge_done(challenge_id, done).await {
            Ok(true) => true,
            Ok(false) => {
                warn!(challenge_id, "Cannot update status of unknown challenge");
                false
            }
            Err(e) => {
                error!(challenge_id, error = %e, "Failed to update challenge status");
                false
            }
        }
    }

    /// Flip the completion flag of a challenge and persist it.
    pub async fn toggle_done(&self, challenge_id: &str) -> ToggleOutcome {
        let current = match self.store.list_challenges().await {
            Ok(challenges) => challenges
                .into_iter()
                .find(|c| c.id == challenge_id)
                .map(|c| c.is_done),
            Err(e) => {
                error!(challenge_id, error = %e, "Failed to read challenge before toggling");
                return ToggleOutcome::Failed;
            }
        };

        let Some(current) = current else {
            return ToggleOutcome::Missing;
        };

        match self.store.set_challenge_done(challenge_id, !current).await {
            Ok(true) => ToggleOutcome::Toggled(!current),
            Ok(false) => ToggleOutcome::Missing,
            Err(e) => {
                error!(challenge_id, error = %e, "Failed to toggle challenge status");
                ToggleOutcome::Failed
            }
        }
    }

    /// The whole persisted document as pretty JSON, ready to be saved to a file.
    pub async fn export_json(&self) -> Option<String> {
        let document = match self.store.export_document().await {
            Ok(document) => document,
            Err(e) => {
                error!(error = %e, "Failed to export game data");
                return None;
            }
        };
        match document.to_pretty_json() {
            Ok(json) => Some(json),
            Err(e) => {
                error!(error = %e, "Failed to serialize game data");
                None
            }
        }
    }

    /// Replace the store's contents. `false` when the store refused it.
    pub async fn import(&self, document: Document) -> bool {
        match self.store.import_document(document).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Failed to import game data");
                false
            }
        }
    }
}
