use axum::Json;
use axum::extract::State;
use common::{Deployment, Provider};
use tracing::instrument;

use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/providers",
    tag = "Catalog",
    operation_id = "listProviders",
    summary = "List cloud providers",
    description = "Returns the providers on the wheel in catalog order. Falls back to the built-in provider list when the store cannot be read.",
    responses(
        (status = 200, description = "Providers", body = Vec<Provider>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_providers(State(state): State<AppState>) -> Json<Vec<Provider>> {
    Json(state.service.providers().await)
}

#[utoipa::path(
    get,
    path = "/deployments",
    tag = "Catalog",
    operation_id = "listDeployments",
    summary = "List deployment tasks",
    description = "Returns every deployment that can be drawn, in catalog order. Empty when the store cannot be read.",
    responses(
        (status = 200, description = "Deployments", body = Vec<Deployment>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_deployments(State(state): State<AppState>) -> Json<Vec<Deployment>> {
    Json(state.service.deployments().await)
}
