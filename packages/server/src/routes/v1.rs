use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(catalog_routes())
        .merge(challenge_routes())
        .merge(spin_routes())
        .merge(tracker_routes())
        .merge(data_routes())
}

fn catalog_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::catalog::list_providers))
        .routes(routes!(handlers::catalog::list_deployments))
}

fn challenge_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::challenge::list_challenges,
            handlers::challenge::create_challenge
        ))
        .routes(routes!(handlers::challenge::update_challenge))
        .routes(routes!(handlers::challenge::toggle_challenge))
}

fn spin_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::spin::spin_provider))
        .routes(routes!(handlers::spin::spin_deployment))
}

fn tracker_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::tracker::get_tracker))
}

fn data_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::data::export_data))
        .routes(routes!(handlers::data::import_data))
}
