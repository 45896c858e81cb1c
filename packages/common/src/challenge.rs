use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Deployment, Provider};

/// Display name used when a challenge points at a provider or deployment
/// that no longer exists.
pub const UNKNOWN_REFERENCE: &str = "Unknown";

/// One attempted (provider, deployment) pairing as shown to players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Challenge {
    pub id: String,
    #[schema(example = "AWS")]
    pub provider_name: String,
    #[schema(example = "Basic VM")]
    pub deployment_name: String,
    pub is_done: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

/// A challenge as persisted: references the catalog by id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct StoredChallenge {
    pub id: String,
    pub provider_id: String,
    pub deployment_id: String,
    pub is_done: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl StoredChallenge {
    /// A fresh, not yet completed attempt with a time-ordered id.
    ///
    /// `created_at` is kept at millisecond precision so every backend stores
    /// it without loss.
    pub fn new(provider_id: impl Into<String>, deployment_id: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            provider_id: provider_id.into(),
            deployment_id: deployment_id.into(),
            is_done: false,
            created_at: Utc::now().trunc_subsecs(3),
            video_url: None,
        }
    }

    /// Resolve catalog references into display names.
    ///
    /// Dangling references resolve to [`UNKNOWN_REFERENCE`] instead of failing.
    pub fn resolve(&self, providers: &[Provider], deployments: &[Deployment]) -> Challenge {
        let provider_name = providers
            .iter()
            .find(|p| p.id == self.provider_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| UNKNOWN_REFERENCE.to_string());
        let deployment_name = deployments
            .iter()
            .find(|d| d.id == self.deployment_id)
            .map(|d| d.name.clone())
            .unwrap_or_else(|| UNKNOWN_REFERENCE.to_string());

        Challenge {
            id: self.id.clone(),
            provider_name,
            deployment_name,
            is_done: self.is_done,
            created_at: self.created_at,
            video_url: self.video_url.clone(),
        }
    }
}
