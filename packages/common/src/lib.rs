pub mod catalog;
pub mod challenge;
pub mod config;
#[cfg(feature = "sea-orm")]
pub mod database;
pub mod document;
#[cfg(feature = "sea-orm")]
pub mod entity;
pub mod flow;
pub mod lifecycle;
pub mod selection;
pub mod session;
pub mod storage;
pub mod tracker;

pub use catalog::{Deployment, Provider};
pub use challenge::{Challenge, StoredChallenge};
pub use document::{Document, DocumentError};
pub use flow::{FlowController, Stage};
pub use lifecycle::{ChallengeService, ToggleOutcome};
pub use tracker::{TrackerMatrix, TrackerMode};
