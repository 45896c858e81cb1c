use common::TrackerMode;
use serde::Deserialize;

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TrackerQuery {
    /// `deployment` (one row per deployment) or `challenge` (one row per
    /// challenge). Defaults to the server's `game.tracker_mode`.
    pub mode: Option<TrackerMode>,
}
