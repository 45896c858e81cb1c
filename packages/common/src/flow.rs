//! Stage machine driving a game round.
//!
//! `provider-selection -> project-selection -> tracker`, then back to
//! provider selection only through [`FlowController::restart`]. Timed
//! transitions are tokio tasks tagged with the epoch they were scheduled in;
//! any later transition bumps the epoch, so a timer that outlived its stage
//! never applies.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    ProviderSelection,
    ProjectSelection,
    Tracker,
}

impl Stage {
    /// The stage a forward transition leads to. The tracker is the end of a
    /// round and has none.
    pub fn next(self) -> Option<Stage> {
        match self {
            Self::ProviderSelection => Some(Self::ProjectSelection),
            Self::ProjectSelection => Some(Self::Tracker),
            Self::Tracker => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProviderSelection => "provider-selection",
            Self::ProjectSelection => "project-selection",
            Self::Tracker => "tracker",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "provider-selection" => Ok(Self::ProviderSelection),
            "project-selection" => Ok(Self::ProjectSelection),
            "tracker" => Ok(Self::Tracker),
            other => Err(format!("unknown stage '{other}'")),
        }
    }
}

struct Inner {
    stage: watch::Sender<Stage>,
    epoch: AtomicU64,
}

impl Inner {
    /// Move to `stage` and invalidate every timer scheduled before.
    fn transition(&self, stage: Stage) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        let previous = self.stage.send_replace(stage);
        if previous != stage {
            info!(from = %previous, to = %stage, "Stage changed");
        }
    }
}

/// Owns the current [`Stage`] and at most one pending timed transition.
///
/// [`shutdown`](Self::shutdown) or dropping the controller aborts the pending
/// timer.
pub struct FlowController {
    inner: Arc<Inner>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl FlowController {
    pub fn new(initial: Stage) -> Self {
        let (stage, _) = watch::channel(initial);
        Self {
            inner: Arc::new(Inner {
                stage,
                epoch: AtomicU64::new(0),
            }),
            pending: Mutex::new(None),
        }
    }

    pub fn stage(&self) -> Stage {
        *self.inner.stage.borrow()
    }

    /// Receiver notified on every stage change, timed or manual.
    pub fn subscribe(&self) -> watch::Receiver<Stage> {
        self.inner.stage.subscribe()
    }

    /// Manual "continue": move to the next stage, if any.
    pub fn advance(&self) -> Option<Stage> {
        self.cancel_pending();
        let next = self.stage().next()?;
        self.inner.transition(next);
        Some(next)
    }

    /// Jump straight to `stage`.
    pub fn go_to(&self, stage: Stage) {
        self.cancel_pending();
        self.inner.transition(stage);
    }

    /// Start a new round from provider selection.
    pub fn restart(&self) {
        self.go_to(Stage::ProviderSelection);
    }

    /// Advance automatically after `after`, unless some other transition
    /// happens first. Replaces any previously scheduled advance.
    pub fn schedule_advance(&self, after: Duration) {
        self.cancel_pending();

        let Some(target) = self.stage().next() else {
            return;
        };
        let epoch = self.inner.epoch.load(Ordering::SeqCst);
        let inner: Weak<Inner> = Arc::downgrade(&self.inner);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let Some(inner) = inner.upgrade() else {
                return;
            };
            if inner.epoch.load(Ordering::SeqCst) != epoch {
                debug!(%target, "Dropping stale timed transition");
                return;
            }
            inner.transition(target);
        });

        debug!(%target, after_ms = after.as_millis() as u64, "Scheduled timed transition");
        if let Ok(mut pending) = self.pending.lock() {
            *pending = Some(handle);
        }
    }

    /// Whether a timed transition is still waiting to fire.
    pub fn has_pending(&self) -> bool {
        self.pending
            .lock()
            .map(|p| p.as_ref().is_some_and(|h| !h.is_finished()))
            .unwrap_or(false)
    }

    /// Abort the pending timed transition, if any.
    pub fn cancel_pending(&self) {
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        let handle = match self.pending.lock() {
            Ok(mut pending) => pending.take(),
            Err(_) => None,
        };
        if let Some(handle) = handle {
            handle.abort();
        }
    }

    /// Tear down: abort the pending timer. The current stage is kept.
    pub fn shutdown(&self) {
        self.cancel_pending();
        debug!(stage = %self.stage(), "Flow controller shut down");
    }
}

impl Drop for FlowController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
