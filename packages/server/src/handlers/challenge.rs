use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{Challenge, ToggleOutcome};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::challenge::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/challenges",
    tag = "Challenges",
    operation_id = "listChallenges",
    summary = "List recorded challenges",
    description = "Returns every challenge, oldest first. Providers or deployments that no longer exist show as `Unknown`.",
    responses(
        (status = 200, description = "Challenges", body = Vec<Challenge>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_challenges(State(state): State<AppState>) -> Json<Vec<Challenge>> {
    Json(state.service.challenges().await)
}

#[utoipa::path(
    post,
    path = "/challenges",
    tag = "Challenges",
    operation_id = "createChallenge",
    summary = "Start a challenge",
    description = "Records a new, not yet completed attempt of a deployment on a provider.",
    request_body = CreateChallengeRequest,
    responses(
        (status = 201, description = "Challenge created", body = Challenge),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Unknown provider or deployment (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(provider_id = %payload.provider_id, deployment_id = %payload.deployment_id))]
pub async fn create_challenge(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateChallengeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = state
        .service
        .store()
        .create_challenge(&payload.provider_id, &payload.deployment_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Provider '{}' or deployment '{}' not found",
                payload.provider_id, payload.deployment_id
            ))
        })?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch,
    path = "/challenges/{id}",
    tag = "Challenges",
    operation_id = "updateChallenge",
    summary = "Set a challenge's completion state",
    params(("id" = String, Path, description = "Challenge id")),
    request_body = UpdateChallengeRequest,
    responses(
        (status = 200, description = "Updated challenge", body = Challenge),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Challenge not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(is_done = payload.is_done))]
pub async fn update_challenge(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateChallengeRequest>,
) -> Result<Json<Challenge>, AppError> {
    let store = state.service.store();
    if !store.set_challenge_done(&id, payload.is_done).await? {
        return Err(AppError::NotFound(format!("Challenge '{id}' not found")));
    }

    let challenge = store
        .list_challenges()
        .await?
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Challenge '{id}' not found")))?;

    Ok(Json(challenge))
}

#[utoipa::path(
    post,
    path = "/challenges/{id}/toggle",
    tag = "Challenges",
    operation_id = "toggleChallenge",
    summary = "Flip a challenge's completion state",
    description = "Returns the new state so clients can confirm an optimistic update, or revert it on error.",
    params(("id" = String, Path, description = "Challenge id")),
    responses(
        (status = 200, description = "New completion state", body = ToggleResponse),
        (status = 404, description = "Challenge not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Store failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn toggle_challenge(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ToggleResponse>, AppError> {
    match state.service.toggle_done(&id).await {
        ToggleOutcome::Toggled(is_done) => Ok(Json(ToggleResponse { id, is_done })),
        ToggleOutcome::Missing => Err(AppError::NotFound(format!("Challenge '{id}' not found"))),
        ToggleOutcome::Failed => Err(AppError::Internal(format!(
            "Failed to toggle challenge '{id}'"
        ))),
    }
}
