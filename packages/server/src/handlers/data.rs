use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use common::Document;
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::data::ImportResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/data/export",
    tag = "Data",
    operation_id = "exportData",
    summary = "Download all game data",
    description = "Returns the whole persisted document (providers, deployments, challenges) as a pretty-printed JSON attachment.",
    responses(
        (status = 200, description = "Game document", body = Document, content_type = "application/json"),
        (status = 500, description = "Store failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn export_data(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let document = state.service.store().export_document().await?;
    let json = document
        .to_pretty_json()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let filename = format!("cloud-roulette-{}.json", chrono::Utc::now().format("%Y-%m-%d"));
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        json,
    ))
}

#[utoipa::path(
    post,
    path = "/data/import",
    tag = "Data",
    operation_id = "importData",
    summary = "Replace all game data",
    description = "Replaces providers, deployments and challenges with the uploaded document. Rejected when ids repeat; challenges pointing at a missing provider or deployment are kept and listed as Unknown.",
    request_body = Document,
    responses(
        (status = 200, description = "Document imported", body = ImportResponse),
        (status = 400, description = "Invalid document (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, document))]
pub async fn import_data(
    State(state): State<AppState>,
    AppJson(document): AppJson<Document>,
) -> Result<Json<ImportResponse>, AppError> {
    let counts = ImportResponse {
        providers: document.providers.len(),
        deployments: document.deployments.len(),
        challenges: document.challenges.len(),
    };
    state.service.store().import_document(document).await?;

    info!(
        providers = counts.providers,
        deployments = counts.deployments,
        challenges = counts.challenges,
        "Game data imported over HTTP"
    );
    Ok(Json(counts))
}
