use common::ChallengeService;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub service: ChallengeService,
    pub config: AppConfig,
}
