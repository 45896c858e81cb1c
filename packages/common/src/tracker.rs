//! Completion matrix shown on the tracker page.
//!
//! Columns are providers. Rows are either the distinct deployment names of the
//! catalog or one row per recorded challenge. Cells are matched on display
//! names because that is what a [`Challenge`] carries; catalog entries that
//! share a name collapse into a single row or column.

use serde::{Deserialize, Serialize};

use crate::catalog::{Deployment, Provider};
use crate::challenge::Challenge;
use crate::lifecycle::{ChallengeService, ToggleOutcome};

/// How rows of the matrix are formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub enum TrackerMode {
    /// One row per distinct deployment name.
    #[default]
    #[serde(rename = "deployment")]
    ByDeployment,
    /// One row per recorded challenge, oldest first.
    #[serde(rename = "challenge")]
    ByChallenge,
}

impl TrackerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ByDeployment => "deployment",
            Self::ByChallenge => "challenge",
        }
    }
}

impl std::str::FromStr for TrackerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deployment" => Ok(Self::ByDeployment),
            "challenge" => Ok(Self::ByChallenge),
            other => Err(format!("unknown tracker mode '{other}'")),
        }
    }
}

/// State of one (row, provider) intersection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct TrackerCell {
    /// At least one challenge exists for this pair.
    pub attempted: bool,
    /// At least one challenge for this pair is done.
    pub done: bool,
    /// Challenges contributing to this cell.
    pub challenge_ids: Vec<String>,
}

impl TrackerCell {
    fn record(&mut self, challenge: &Challenge) {
        self.attempted = true;
        self.done |= challenge.is_done;
        self.challenge_ids.push(challenge.id.clone());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct TrackerRow {
    /// Deployment name shown at the start of the row.
    pub deployment_name: String,
    /// Set in challenge mode: the challenge this row stands for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge_id: Option<String>,
    /// One cell per column, in column order.
    pub cells: Vec<TrackerCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct TrackerMatrix {
    pub mode: TrackerMode,
    /// Providers, one per column.
    pub columns: Vec<Provider>,
    pub rows: Vec<TrackerRow>,
    /// Challenges that fit no cell because their provider or deployment is
    /// not in the catalog.
    pub unmatched: usize,
}

impl TrackerMatrix {
    pub fn build(
        providers: &[Provider],
        deployments: &[Deployment],
        challenges: &[Challenge],
        mode: TrackerMode,
    ) -> Self {
        let mut columns: Vec<Provider> = Vec::with_capacity(providers.len());
        for provider in providers {
            if !columns.iter().any(|c| c.name == provider.name) {
                columns.push(provider.clone());
            }
        }
        let column_of = |name: &str| columns.iter().position(|c| c.name == name);

        let mut rows = Vec::new();
        let mut unmatched = 0;

        match mode {
            TrackerMode::ByDeployment => {
                for deployment in deployments {
                    if !rows
                        .iter()
                        .any(|r: &TrackerRow| r.deployment_name == deployment.name)
                    {
                        rows.push(TrackerRow {
                            deployment_name: deployment.name.clone(),
                            challenge_id: None,
                            cells: vec![TrackerCell::default(); columns.len()],
                        });
                    }
                }
                for challenge in challenges {
                    let row = rows
                        .iter()
                        .position(|r| r.deployment_name == challenge.deployment_name);
                    match (row, column_of(&challenge.provider_name)) {
                        (Some(row), Some(column)) => rows[row].cells[column].record(challenge),
                        _ => unmatched += 1,
                    }
                }
            }
            TrackerMode::ByChallenge => {
                for challenge in challenges {
                    let mut cells = vec![TrackerCell::default(); columns.len()];
                    match column_of(&challenge.provider_name) {
                        Some(column) => cells[column].record(challenge),
                        None => unmatched += 1,
                    }
                    rows.push(TrackerRow {
                        deployment_name: challenge.deployment_name.clone(),
                        challenge_id: Some(challenge.id.clone()),
                        cells,
                    });
                }
            }
        }

        Self {
            mode,
            columns,
            rows,
            unmatched,
        }
    }

    /// Cell for a deployment and provider name. In challenge mode the first
    /// matching row wins.
    pub fn cell(&self, deployment_name: &str, provider_name: &str) -> Option<&TrackerCell> {
        let column = self.columns.iter().position(|c| c.name == provider_name)?;
        self.rows
            .iter()
            .find(|r| r.deployment_name == deployment_name)
            .map(|r| &r.cells[column])
    }

    /// Whether any challenge for the pair is done, across all rows.
    pub fn is_done(&self, deployment_name: &str, provider_name: &str) -> bool {
        let Some(column) = self.columns.iter().position(|c| c.name == provider_name) else {
            return false;
        };
        self.rows
            .iter()
            .filter(|r| r.deployment_name == deployment_name)
            .any(|r| r.cells[column].done)
    }

    /// Number of done cells.
    pub fn completed(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .filter(|c| c.done)
            .count()
    }
}

/// Tracker page state: a local copy of the store's lists with optimistic
/// toggling.
pub struct ChallengeBoard {
    service: ChallengeService,
    providers: Vec<Provider>,
    deployments: Vec<Deployment>,
    challenges: Vec<Challenge>,
}

impl ChallengeBoard {
    pub async fn load(service: ChallengeService) -> Self {
        let mut board = Self {
            service,
            providers: Vec::new(),
            deployments: Vec::new(),
            challenges: Vec::new(),
        };
        board.refresh().await;
        board
    }

    /// Re-fetch everything from the store.
    pub async fn refresh(&mut self) {
        self.providers = self.service.providers().await;
        self.deployments = self.service.deployments().await;
        self.challenges = self.service.challenges().await;
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn deployments(&self) -> &[Deployment] {
        &self.deployments
    }

    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    pub fn matrix(&self, mode: TrackerMode) -> TrackerMatrix {
        TrackerMatrix::build(&self.providers, &self.deployments, &self.challenges, mode)
    }

    /// Flip a challenge locally, then persist it. The local flag is reverted
    /// when the store does not confirm the write.
    pub async fn toggle(&mut self, challenge_id: &str) -> ToggleOutcome {
        let Some(index) = self.challenges.iter().position(|c| c.id == challenge_id) else {
            return ToggleOutcome::Missing;
        };

        let previous = self.challenges[index].is_done;
        self.challenges[index].is_done = !previous;

        if self.service.set_done(challenge_id, !previous).await {
            ToggleOutcome::Toggled(!previous)
        } else {
            self.challenges[index].is_done = previous;
            ToggleOutcome::Failed
        }
    }
}
