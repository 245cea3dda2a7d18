use super::composer::RedirectComposer;
use crate::domain::params::{AuthCallback, IncomingParameters};
use crate::domain::state::{Countdown, HandoffSnapshot, HandoffState};
use crate::domain::target::{FlowLinks, RedirectTarget, TargetVariant};
use crate::error::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::Duration;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

/// Delays driving the automatic handoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceTimings {
    /// Value the cosmetic countdown starts from.
    pub countdown_from: u32,
    /// Period of the countdown ticker.
    pub tick: Duration,
    /// Delay from start until the primary redirect fires.
    pub handoff_delay: Duration,
    /// Delay from the redirect until the fallback action is revealed.
    pub fallback_delay: Duration,
}

impl Default for SequenceTimings {
    fn default() -> Self {
        Self {
            countdown_from: Countdown::DEFAULT_START,
            tick: Duration::from_secs(1),
            handoff_delay: Duration::from_secs(2),
            fallback_delay: Duration::from_secs(2),
        }
    }
}

struct Shared {
    params: AuthCallback,
    links: FlowLinks,
    composer: RedirectComposer,
    snapshot: watch::Sender<HandoffSnapshot>,
    // Held by every callback for the whole of its effect; teardown takes it
    // to wait out a callback that is already running.
    gate: Mutex<()>,
    torn_down: AtomicBool,
    tasks: StdMutex<Vec<JoinHandle<()>>>,
}

impl Shared {
    fn is_live(&self) -> bool {
        !self.torn_down.load(Ordering::Acquire)
    }

    fn register(&self, handle: JoinHandle<()>) {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handle);
    }

    fn cancel_all(&self) {
        self.torn_down.store(true, Ordering::Release);
        let tasks = std::mem::take(
            &mut *self.tasks.lock().unwrap_or_else(PoisonError::into_inner),
        );
        for task in tasks {
            task.abort();
        }
    }

    fn state(&self) -> HandoffState {
        self.snapshot.borrow().state
    }

    fn transition(&self, to: HandoffState) {
        self.snapshot.send_modify(|snapshot| {
            tracing::debug!(from = ?snapshot.state, to = ?to, "handoff transition");
            snapshot.state = to;
        });
    }
}

/// The auth handoff page: redirects on its own, then offers a manual retry.
///
/// Runs `REDIRECTING -> HANDED_OFF -> FALLBACK` on timers owned by this
/// handle. [`AuthHandoff::teardown`] (or dropping the handle) cancels every
/// outstanding timer; nothing fires afterwards.
pub struct AuthHandoff {
    shared: Arc<Shared>,
    valid: bool,
}

impl AuthHandoff {
    /// Starts the sequence. Must be called from within a tokio runtime.
    pub fn start(
        params: AuthCallback,
        links: FlowLinks,
        composer: RedirectComposer,
        timings: SequenceTimings,
    ) -> Self {
        let valid = params.is_valid();
        let (snapshot, _) = watch::channel(HandoffSnapshot {
            state: HandoffState::Redirecting,
            countdown: Countdown::new(timings.countdown_from),
        });
        let shared = Arc::new(Shared {
            params,
            links,
            composer,
            snapshot,
            gate: Mutex::new(()),
            torn_down: AtomicBool::new(false),
            tasks: StdMutex::new(Vec::new()),
        });

        let ticker = tokio::spawn(run_ticker(Arc::clone(&shared), timings.tick));
        let handoff = tokio::spawn(run_handoff(
            Arc::clone(&shared),
            timings.handoff_delay,
            timings.fallback_delay,
        ));
        shared.register(ticker);
        shared.register(handoff);

        tracing::debug!(valid, "auth handoff started");
        Self { shared, valid }
    }

    pub fn params(&self) -> &AuthCallback {
        &self.shared.params
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn snapshot(&self) -> HandoffSnapshot {
        *self.shared.snapshot.borrow()
    }

    /// A read-only feed of snapshots for the presentation layer.
    pub fn subscribe(&self) -> watch::Receiver<HandoffSnapshot> {
        self.shared.snapshot.subscribe()
    }

    /// The manual fallback action.
    ///
    /// Redirects to the alternate target and returns it, but only once the
    /// fallback has been revealed and before teardown. Otherwise does nothing
    /// and returns `None`.
    pub async fn open_app(&self) -> Result<Option<RedirectTarget>> {
        let _gate = self.shared.gate.lock().await;
        if !self.shared.is_live() {
            tracing::warn!("manual redirect ignored after teardown");
            return Ok(None);
        }
        let state = self.shared.state();
        if state != HandoffState::Fallback {
            tracing::warn!(state = ?state, "manual redirect ignored before fallback");
            return Ok(None);
        }

        let link = self.shared.links.get(TargetVariant::Alternate);
        let target = self.shared.composer.redirect(link, &self.shared.params).await?;
        Ok(Some(target))
    }

    /// Cancels the countdown and both delayed actions.
    ///
    /// Waits for a callback that is mid-flight to finish; once this returns no
    /// redirect or state change can happen.
    pub async fn teardown(self) {
        let _gate = self.shared.gate.lock().await;
        self.shared.cancel_all();
        tracing::debug!(state = ?self.shared.state(), "auth handoff torn down");
    }
}

impl Drop for AuthHandoff {
    fn drop(&mut self) {
        self.shared.cancel_all();
    }
}

async fn run_ticker(shared: Arc<Shared>, period: Duration) {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    loop {
        ticker.tick().await;
        let _gate = shared.gate.lock().await;
        if !shared.is_live() {
            return;
        }
        shared.snapshot.send_if_modified(|snapshot| {
            if snapshot.countdown.is_finished() {
                return false;
            }
            snapshot.countdown.tick();
            true
        });
    }
}

async fn run_handoff(shared: Arc<Shared>, delay: Duration, fallback_delay: Duration) {
    time::sleep(delay).await;
    let _gate = shared.gate.lock().await;
    if !shared.is_live() {
        return;
    }

    let link = shared.links.get(TargetVariant::Primary);
    if let Err(e) = shared.composer.redirect(link, &shared.params).await {
        tracing::warn!(error = %e, "automatic redirect failed");
    }
    // Drop marks the handle torn down without waiting for the gate.
    if !shared.is_live() {
        return;
    }
    shared.transition(HandoffState::HandedOff);

    let deadline = Instant::now() + fallback_delay;
    let fallback = tokio::spawn(run_fallback(Arc::clone(&shared), deadline));
    shared.register(fallback);
}

async fn run_fallback(shared: Arc<Shared>, deadline: Instant) {
    time::sleep_until(deadline).await;
    let _gate = shared.gate.lock().await;
    if !shared.is_live() {
        return;
    }
    shared.transition(HandoffState::Fallback);
}
