use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{
    DEFAULT_CHALLENGES, Deployment, Provider, default_deployments, default_providers,
};
use crate::challenge::{Challenge, StoredChallenge};

/// Reasons a document is refused on import.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("duplicate {collection} id '{id}'")]
    DuplicateId { collection: &'static str, id: String },

    #[error("challenge '{challenge_id}' references unknown {kind} '{id}'")]
    DanglingReference {
        challenge_id: String,
        kind: &'static str,
        id: String,
    },
}

/// The complete persisted state: reference lists plus every attempt.
///
/// This is the layout written by the local store, produced by export and
/// accepted by import.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Document {
    #[serde(default)]
    pub providers: Vec<Provider>,
    #[serde(default)]
    pub deployments: Vec<Deployment>,
    #[serde(default)]
    pub challenges: Vec<StoredChallenge>,
}

impl Document {
    /// The catalog a brand new installation starts with, sample attempts included.
    pub fn default_catalog() -> Self {
        let challenges = DEFAULT_CHALLENGES
            .iter()
            .map(|&(id, provider_id, deployment_id, is_done, created_at)| StoredChallenge {
                id: id.to_string(),
                provider_id: provider_id.to_string(),
                deployment_id: deployment_id.to_string(),
                is_done,
                created_at: created_at
                    .parse::<DateTime<Utc>>()
                    .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
                video_url: None,
            })
            .collect();

        Self {
            providers: default_providers(),
            deployments: default_deployments(),
            challenges,
        }
    }

    pub fn provider(&self, id: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == id)
    }

    pub fn deployment(&self, id: &str) -> Option<&Deployment> {
        self.deployments.iter().find(|d| d.id == id)
    }

    pub fn challenge_mut(&mut self, id: &str) -> Option<&mut StoredChallenge> {
        self.challenges.iter_mut().find(|c| c.id == id)
    }

    /// All challenges with catalog references resolved to names.
    pub fn resolved_challenges(&self) -> Vec<Challenge> {
        self.challenges
            .iter()
            .map(|c| c.resolve(&self.providers, &self.deployments))
            .collect()
    }

    /// Check id uniqueness in every collection.
    ///
    /// Challenges may still point at providers or deployments that are no
    /// longer listed; they resolve to `"Unknown"`.
    pub fn validate(&self) -> Result<(), DocumentError> {
        unique_ids("provider", self.providers.iter().map(|p| p.id.as_str()))?;
        unique_ids("deployment", self.deployments.iter().map(|d| d.id.as_str()))?;
        unique_ids("challenge", self.challenges.iter().map(|c| c.id.as_str()))?;
        Ok(())
    }

    /// Check that every challenge points at a known provider and deployment.
    /// Needed by stores that enforce foreign keys.
    pub fn validate_references(&self) -> Result<(), DocumentError> {
        for challenge in &self.challenges {
            if self.provider(&challenge.provider_id).is_none() {
                return Err(DocumentError::DanglingReference {
                    challenge_id: challenge.id.clone(),
                    kind: "provider",
                    id: challenge.provider_id.clone(),
                });
            }
            if self.deployment(&challenge.deployment_id).is_none() {
                return Err(DocumentError::DanglingReference {
                    challenge_id: challenge.id.clone(),
                    kind: "deployment",
                    id: challenge.deployment_id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Serialize with two-space indentation, the export file format.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse and validate an exported document.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let document: Self = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }
}

fn unique_ids<'a>(
    collection: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), DocumentError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DocumentError::DuplicateId {
                collection,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
