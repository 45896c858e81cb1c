//! One player's round: spin a provider, spin a deployment, record the
//! challenge, look at the tracker, start over.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::catalog::{Deployment, Provider};
use crate::challenge::Challenge;
use crate::config::GameConfig;
use crate::flow::{FlowController, Stage};
use crate::lifecycle::ChallengeService;
use crate::selection::{SpinPlan, SpinTiming, available_deployments};

/// A finished draw together with the animation leading up to it.
#[derive(Debug, Clone)]
pub struct Spin<T> {
    candidates: Vec<T>,
    plan: SpinPlan,
}

impl<T> Spin<T> {
    /// Draw from `candidates`. `None` when there is nothing to draw.
    pub fn draw<R: Rng + ?Sized>(candidates: Vec<T>, timing: SpinTiming, rng: &mut R) -> Option<Self> {
        let plan = SpinPlan::new(candidates.len(), timing, rng)?;
        Some(Self { candidates, plan })
    }

    pub fn pick(&self) -> &T {
        &self.candidates[self.plan.winner()]
    }

    pub fn candidates(&self) -> &[T] {
        &self.candidates
    }

    pub fn plan(&self) -> &SpinPlan {
        &self.plan
    }

    /// Candidates in the order the animation shows them; the last one is the pick.
    pub fn frames(&self) -> impl Iterator<Item = &T> {
        self.plan.frames().iter().map(|&i| &self.candidates[i])
    }

    pub fn into_pick(mut self) -> T {
        self.candidates.swap_remove(self.plan.winner())
    }
}

/// Deployment draw and the challenge recorded for it.
#[derive(Debug, Clone)]
pub struct DeploymentSpin {
    pub spin: Spin<Deployment>,
    /// `None` when the store did not accept the new challenge.
    pub challenge: Option<Challenge>,
}

/// Spin over the current providers, falling back to the built-in list when
/// the store cannot be read.
pub async fn spin_provider<R: Rng + ?Sized>(
    service: &ChallengeService,
    timing: SpinTiming,
    rng: &mut R,
) -> Option<Spin<Provider>> {
    let providers = service.providers().await;
    let spin = Spin::draw(providers, timing, rng);
    match &spin {
        Some(spin) => info!(provider = %spin.pick().name, "Provider picked"),
        None => warn!("No providers to spin"),
    }
    spin
}

/// Spin a deployment for `provider` and record the resulting challenge.
///
/// With `exclude_completed`, deployments already done on this provider are
/// left out of the draw. `None` when no deployment is eligible.
pub async fn spin_deployment<R: Rng + ?Sized>(
    service: &ChallengeService,
    provider: &Provider,
    exclude_completed: bool,
    timing: SpinTiming,
    rng: &mut R,
) -> Option<DeploymentSpin> {
    let deployments = service.deployments().await;
    let candidates: Vec<Deployment> = if exclude_completed {
        let challenges = service.challenges().await;
        available_deployments(&deployments, &challenges, provider)
            .into_iter()
            .cloned()
            .collect()
    } else {
        deployments
    };

    let Some(spin) = Spin::draw(candidates, timing, rng) else {
        warn!(provider = %provider.name, exclude_completed, "No deployments to spin");
        return None;
    };
    info!(provider = %provider.name, deployment = %spin.pick().name, "Deployment picked");

    let challenge = service.start_challenge(&provider.id, &spin.pick().id).await;
    Some(DeploymentSpin { spin, challenge })
}

/// Round state for one player.
pub struct GameSession<R = StdRng> {
    service: ChallengeService,
    config: GameConfig,
    flow: FlowController,
    rng: R,
    provider: Option<Provider>,
    deployment: Option<Deployment>,
    challenge: Option<Challenge>,
}

impl GameSession<StdRng> {
    pub fn new(service: ChallengeService, config: GameConfig) -> Self {
        Self::with_rng(service, config, StdRng::from_os_rng())
    }
}

impl<R: Rng> GameSession<R> {
    pub fn with_rng(service: ChallengeService, config: GameConfig, rng: R) -> Self {
        let flow = FlowController::new(config.initial_stage);
        Self {
            service,
            config,
            flow,
            rng,
            provider: None,
            deployment: None,
            challenge: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.flow.stage()
    }

    pub fn flow(&self) -> &FlowController {
        &self.flow
    }

    pub fn service(&self) -> &ChallengeService {
        &self.service
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn selected_provider(&self) -> Option<&Provider> {
        self.provider.as_ref()
    }

    pub fn selected_deployment(&self) -> Option<&Deployment> {
        self.deployment.as_ref()
    }

    /// Challenge recorded by the latest deployment spin.
    pub fn last_challenge(&self) -> Option<&Challenge> {
        self.challenge.as_ref()
    }

    /// Spin the provider wheel. On success the session auto-advances to
    /// project selection once the pick has been revealed for
    /// `auto_advance_secs`.
    pub async fn spin_provider(&mut self) -> Option<Spin<Provider>> {
        if self.stage() != Stage::ProviderSelection {
            self.flow.go_to(Stage::ProviderSelection);
        }

        let spin = spin_provider(&self.service, self.config.spin_timing(), &mut self.rng).await?;
        self.provider = Some(spin.pick().clone());
        self.deployment = None;
        self.challenge = None;
        self.schedule_auto_advance(spin.plan());
        Some(spin)
    }

    /// Spin a deployment for the selected provider and record the challenge.
    /// `None` when no provider has been picked yet or nothing is eligible.
    pub async fn spin_deployment(&mut self) -> Option<DeploymentSpin> {
        let Some(provider) = self.provider.clone() else {
            warn!("Deployment spin requested before a provider was picked");
            return None;
        };
        if self.stage() != Stage::ProjectSelection {
            self.flow.go_to(Stage::ProjectSelection);
        }

        let result = spin_deployment(
            &self.service,
            &provider,
            self.config.exclude_completed,
            self.config.spin_timing(),
            &mut self.rng,
        )
        .await?;

        self.deployment = Some(result.spin.pick().clone());
        self.challenge = result.challenge.clone();
        self.schedule_auto_advance(result.spin.plan());
        Some(result)
    }

    /// Manual "continue" to the next stage.
    pub fn continue_stage(&self) -> Option<Stage> {
        self.flow.advance()
    }

    pub fn show_tracker(&self) {
        self.flow.go_to(Stage::Tracker);
    }

    /// Forget the current picks and go back to the provider wheel.
    pub fn restart(&mut self) {
        self.provider = None;
        self.deployment = None;
        self.challenge = None;
        self.flow.restart();
    }

    fn schedule_auto_advance(&self, plan: &SpinPlan) {
        if let Some(after) = self.config.auto_advance() {
            self.flow.schedule_advance(plan.reveal_at() + after);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::catalog::default_providers;
    use crate::lifecycle::tests::{BrokenStore, local_service};

    fn fast_config() -> GameConfig {
        GameConfig {
            spin_duration_ms: 1000,
            spin_tick_ms: 100,
            reveal_delay_ms: 500,
            auto_advance_secs: 5,
            initial_stage: Stage::ProviderSelection,
            ..GameConfig::default()
        }
    }

    #[test]
    fn spin_frames_end_on_pick() {
        let mut rng = StdRng::seed_from_u64(9);
        let spin = Spin::draw(default_providers(), fast_config().spin_timing(), &mut rng).unwrap();
        assert_eq!(spin.frames().count(), 10);
        assert_eq!(spin.frames().last(), Some(spin.pick()));
        let pick = spin.pick().clone();
        assert_eq!(spin.into_pick(), pick);
    }

    #[tokio::test(start_paused = true)]
    async fn full_round_with_auto_advance() {
        let (service, _dir) = local_service().await;
        let before = service.challenges().await.len();
        let mut session = GameSession::with_rng(service, fast_config(), StdRng::seed_from_u64(1));
        assert_eq!(session.stage(), Stage::ProviderSelection);

        let provider = session.spin_provider().await.unwrap().pick().clone();
        assert_eq!(session.selected_provider(), Some(&provider));

        // reveal_at is 1.5s, auto advance 5s later.
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(session.stage(), Stage::ProviderSelection);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(session.stage(), Stage::ProjectSelection);

        let result = session.spin_deployment().await.unwrap();
        let challenge = result.challenge.unwrap();
        assert_eq!(challenge.provider_name, provider.name);
        assert_eq!(challenge.deployment_name, result.spin.pick().name);
        assert!(!challenge.is_done);

        tokio::time::sleep(Duration::from_secs(7)).await;
        assert_eq!(session.stage(), Stage::Tracker);
        assert_eq!(session.service().challenges().await.len(), before + 1);

        session.restart();
        assert_eq!(session.stage(), Stage::ProviderSelection);
        assert!(session.selected_provider().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn continue_beats_the_timer() {
        let (service, _dir) = local_service().await;
        let mut session = GameSession::with_rng(service, fast_config(), StdRng::seed_from_u64(2));
        session.spin_provider().await.unwrap();

        assert_eq!(session.continue_stage(), Some(Stage::ProjectSelection));
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(session.stage(), Stage::ProjectSelection);
    }

    #[tokio::test]
    async fn deployment_spin_needs_a_provider() {
        let (service, _dir) = local_service().await;
        let mut session = GameSession::with_rng(service, fast_config(), StdRng::seed_from_u64(3));
        assert!(session.spin_deployment().await.is_none());
    }

    #[tokio::test]
    async fn exclusion_skips_completed_pairs() {
        let (service, _dir) = local_service().await;
        let aws = service
            .providers()
            .await
            .into_iter()
            .find(|p| p.id == "aws")
            .unwrap();
        let deployments = service.deployments().await;
        // Complete every deployment but the last on AWS.
        for deployment in &deployments[..deployments.len() - 1] {
            let challenge = service.start_challenge("aws", &deployment.id).await.unwrap();
            assert!(service.set_done(&challenge.id, true).await);
        }

        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..5 {
            let result = spin_deployment(&service, &aws, true, fast_config().spin_timing(), &mut rng)
                .await
                .unwrap();
            assert_eq!(result.spin.candidates().len(), 1);
            assert_eq!(result.spin.pick(), deployments.last().unwrap());
        }
    }

    #[tokio::test]
    async fn provider_spin_survives_broken_store() {
        let service = ChallengeService::new(Arc::new(BrokenStore));
        let mut rng = StdRng::seed_from_u64(5);
        let spin = spin_provider(&service, fast_config().spin_timing(), &mut rng)
            .await
            .unwrap();
        assert!(default_providers().contains(spin.pick()));

        let result = spin_deployment(&service, spin.pick(), false, fast_config().spin_timing(), &mut rng).await;
        assert!(result.is_none());
    }
}
