use serde::{Deserialize, Serialize};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateChallengeRequest {
    /// Provider id from `GET /providers`.
    #[schema(example = "aws")]
    pub provider_id: String,
    /// Deployment id from `GET /deployments`.
    #[schema(example = "basic-vm")]
    pub deployment_id: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateChallengeRequest {
    pub is_done: bool,
}

/// Completion state after a toggle.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ToggleResponse {
    pub id: String,
    pub is_done: bool,
}
