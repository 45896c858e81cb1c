use axum::Json;
use axum::extract::State;
use common::session;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::spin::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/spin/provider",
    tag = "Spin",
    operation_id = "spinProvider",
    summary = "Spin the provider wheel",
    description = "Draws a provider uniformly at random and returns the animation frames leading to it.",
    responses(
        (status = 200, description = "Picked provider", body = ProviderSpinResponse),
        (status = 404, description = "No providers (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn spin_provider(
    State(state): State<AppState>,
) -> Result<Json<ProviderSpinResponse>, AppError> {
    let mut rng = StdRng::from_os_rng();
    let spin = session::spin_provider(&state.service, state.config.game.spin_timing(), &mut rng)
        .await
        .ok_or_else(|| AppError::NotFound("No providers to spin".into()))?;

    Ok(Json(ProviderSpinResponse::from(spin)))
}

#[utoipa::path(
    post,
    path = "/spin/deployment",
    tag = "Spin",
    operation_id = "spinDeployment",
    summary = "Spin a deployment for a provider",
    description = "Draws a deployment uniformly at random, records a new challenge for the pair and returns the animation frames leading to the pick.",
    request_body = SpinDeploymentRequest,
    responses(
        (status = 200, description = "Picked deployment", body = DeploymentSpinResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Unknown provider or nothing left to draw (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(provider_id = %payload.provider_id))]
pub async fn spin_deployment(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SpinDeploymentRequest>,
) -> Result<Json<DeploymentSpinResponse>, AppError> {
    let provider = state
        .service
        .providers()
        .await
        .into_iter()
        .find(|p| p.id == payload.provider_id)
        .ok_or_else(|| {
            AppError::NotFound(format!("Provider '{}' not found", payload.provider_id))
        })?;
    let exclude_completed = payload
        .exclude_completed
        .unwrap_or(state.config.game.exclude_completed);

    let mut rng = StdRng::from_os_rng();
    let result = session::spin_deployment(
        &state.service,
        &provider,
        exclude_completed,
        state.config.game.spin_timing(),
        &mut rng,
    )
    .await
    .ok_or_else(|| {
        AppError::NotFound(format!("No deployments left to spin for '{}'", provider.name))
    })?;

    Ok(Json(DeploymentSpinResponse::from(result)))
}
