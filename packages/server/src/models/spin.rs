use common::session::{DeploymentSpin, Spin};
use common::{Challenge, Deployment, Provider};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct SpinDeploymentRequest {
    /// Provider the deployment is drawn for.
    #[schema(example = "gcp")]
    pub provider_id: String,
    /// Leave out deployments already completed on this provider.
    /// Defaults to the server's `game.exclude_completed` setting.
    pub exclude_completed: Option<bool>,
}

/// What a client needs to replay the wheel animation.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SpinAnimation {
    /// Candidate ids in display order; the last one is the pick.
    pub frames: Vec<String>,
    #[schema(example = 500)]
    pub tick_ms: u64,
    #[schema(example = 5000)]
    pub duration_ms: u64,
    /// Milliseconds after the start of the animation at which to announce the pick.
    #[schema(example = 6000)]
    pub reveal_after_ms: u64,
}

impl SpinAnimation {
    fn new<T>(spin: &Spin<T>, id: impl Fn(&T) -> &str) -> Self {
        let plan = spin.plan();
        let timing = plan.timing();
        Self {
            frames: spin.frames().map(|c| id(c).to_string()).collect(),
            tick_ms: timing.tick.as_millis() as u64,
            duration_ms: timing.duration.as_millis() as u64,
            reveal_after_ms: plan.reveal_at().as_millis() as u64,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProviderSpinResponse {
    pub provider: Provider,
    pub animation: SpinAnimation,
}

impl From<Spin<Provider>> for ProviderSpinResponse {
    fn from(spin: Spin<Provider>) -> Self {
        let animation = SpinAnimation::new(&spin, |p| &p.id);
        Self {
            provider: spin.into_pick(),
            animation,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DeploymentSpinResponse {
    pub deployment: Deployment,
    /// The challenge recorded for this pick; `null` when it could not be saved.
    pub challenge: Option<Challenge>,
    pub animation: SpinAnimation,
}

impl From<DeploymentSpin> for DeploymentSpinResponse {
    fn from(result: DeploymentSpin) -> Self {
        let animation = SpinAnimation::new(&result.spin, |d| &d.id);
        Self {
            deployment: result.spin.into_pick(),
            challenge: result.challenge,
            animation,
        }
    }
}
