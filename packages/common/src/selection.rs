//! Random draws for the wheel and the project picker.
//!
//! Every draw is uniform and with replacement. The spin animation is purely
//! cosmetic: the winning index is drawn before any frame is generated, and the
//! final frame always shows it.

use std::time::Duration;

use rand::Rng;

use crate::catalog::{Deployment, Provider};
use crate::challenge::Challenge;

/// Uniformly pick one element. `None` for an empty slice.
pub fn pick_random<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    Some(&items[rng.random_range(0..items.len())])
}

pub fn pick_random_provider<'a, R: Rng + ?Sized>(
    providers: &'a [Provider],
    rng: &mut R,
) -> Option<&'a Provider> {
    pick_random(providers, rng)
}

pub fn pick_random_deployment<'a, R: Rng + ?Sized>(
    deployments: &'a [Deployment],
    rng: &mut R,
) -> Option<&'a Deployment> {
    pick_random(deployments, rng)
}

/// Deployments not yet completed on `provider`.
///
/// A pair counts as completed when any challenge for it has `is_done` set;
/// open attempts do not exclude anything.
pub fn available_deployments<'a>(
    deployments: &'a [Deployment],
    challenges: &[Challenge],
    provider: &Provider,
) -> Vec<&'a Deployment> {
    deployments
        .iter()
        .filter(|d| {
            !challenges.iter().any(|c| {
                c.is_done && c.provider_name == provider.name && c.deployment_name == d.name
            })
        })
        .collect()
}

/// Pacing of a spin animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinTiming {
    /// Time from the first frame until the animation settles.
    pub duration: Duration,
    /// Time each frame stays on screen.
    pub tick: Duration,
    /// Pause after settling before the pick is announced.
    pub reveal_delay: Duration,
}

impl SpinTiming {
    /// Number of frames shown, at least one.
    pub fn frame_count(&self) -> usize {
        if self.tick.is_zero() {
            return 1;
        }
        let count = self.duration.as_millis() / self.tick.as_millis().max(1);
        usize::try_from(count).unwrap_or(usize::MAX).max(1)
    }
}

/// A pre-computed spin: the candidate highlighted in each frame and the winner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinPlan {
    frames: Vec<usize>,
    winner: usize,
    timing: SpinTiming,
}

impl SpinPlan {
    /// Plan a spin over `candidates` entries. `None` when there is nothing to spin.
    pub fn new<R: Rng + ?Sized>(candidates: usize, timing: SpinTiming, rng: &mut R) -> Option<Self> {
        if candidates == 0 {
            return None;
        }

        let winner = rng.random_range(0..candidates);
        let mut frames: Vec<usize> = (1..timing.frame_count())
            .map(|_| rng.random_range(0..candidates))
            .collect();
        frames.push(winner);

        Some(Self {
            frames,
            winner,
            timing,
        })
    }

    pub fn winner(&self) -> usize {
        self.winner
    }

    pub fn frames(&self) -> &[usize] {
        &self.frames
    }

    pub fn timing(&self) -> SpinTiming {
        self.timing
    }

    /// Candidate highlighted `elapsed` after the spin started.
    pub fn frame_at(&self, elapsed: Duration) -> usize {
        if elapsed >= self.timing.duration || self.timing.tick.is_zero() {
            return self.winner;
        }
        let index = (elapsed.as_millis() / self.timing.tick.as_millis().max(1)) as usize;
        self.frames[index.min(self.frames.len() - 1)]
    }

    /// When the pick may be announced, relative to the start of the spin.
    pub fn reveal_at(&self) -> Duration {
        self.timing.duration + self.timing.reveal_delay
    }
}
