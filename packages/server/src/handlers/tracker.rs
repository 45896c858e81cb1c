use axum::Json;
use axum::extract::{Query, State};
use common::TrackerMatrix;
use tracing::instrument;

use crate::models::tracker::TrackerQuery;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/tracker",
    tag = "Tracker",
    operation_id = "getTracker",
    summary = "Completion matrix",
    description = "Rows are deployments (or challenges in `challenge` mode), columns are providers. A cell is done when at least one challenge for that pair is done. Read-only.",
    params(TrackerQuery),
    responses(
        (status = 200, description = "Tracker matrix", body = TrackerMatrix),
    ),
)]
#[instrument(skip(state, query))]
pub async fn get_tracker(
    State(state): State<AppState>,
    Query(query): Query<TrackerQuery>,
) -> Json<TrackerMatrix> {
    let mode = query.mode.unwrap_or(state.config.game.tracker_mode);
    let providers = state.service.providers().await;
    let deployments = state.service.deployments().await;
    let challenges = state.service.challenges().await;

    Json(TrackerMatrix::build(
        &providers,
        &deployments,
        &challenges,
        mode,
    ))
}
