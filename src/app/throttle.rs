//! Throttled execution of recurring work.
//!
//! A [`ThrottleGate`] runs its work at most once per `delay`. A request that
//! arrives while a run is waiting is absorbed into it; a request that arrives
//! too soon after the previous run is deferred to the end of the window; a
//! request that arrives while the work is executing starts a new cycle once
//! that run finishes. No request is dropped: every accepted batch ends in
//! exactly one run.

use anyhow::{Context as _, Result};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Work guarded by a [`ThrottleGate`].
pub trait ThrottledWork: Send + Sync + 'static {
    fn run(&self) -> Result<()>;
}

impl<F> ThrottledWork for F
where
    F: Fn() -> Result<()> + Send + Sync + 'static,
{
    fn run(&self) -> Result<()> {
        self()
    }
}

/// Observable gate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePhase {
    Idle,
    /// Running on the thread that requested it.
    PendingImmediate,
    /// Waiting for the end of the throttle window.
    PendingScheduled,
    /// A deferred run whose work has started.
    Running,
}

/// What [`ThrottleGate::request_run`] did with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunDisposition {
    /// Folded into the pending run, or into the follow-up of the run that is
    /// executing.
    Absorbed,
    RanImmediately,
    /// Deferred by the given amount.
    Scheduled(Duration),
}

enum Phase {
    Idle,
    Immediate,
    Scheduled { ticket: u64, task: JoinHandle<()> },
    Running,
}

struct GateState {
    phase: Phase,
    /// A request arrived after the current run's work had started.
    rerun_requested: bool,
    last_run: Option<Instant>,
    next_ticket: u64,
    runs: u64,
}

struct GateInner {
    name: String,
    delay: Duration,
    handle: Handle,
    work: Box<dyn ThrottledWork>,
    state: Mutex<GateState>,
}

pub struct ThrottleGate {
    inner: Arc<GateInner>,
}

impl ThrottleGate {
    /// Create a gate that schedules deferred runs on the current tokio runtime.
    pub fn new(name: impl Into<String>, delay: Duration, work: impl ThrottledWork) -> Result<Self> {
        let handle =
            Handle::try_current().context("ThrottleGate must be created inside a tokio runtime")?;
        Ok(Self::with_handle(handle, name, delay, work))
    }

    pub fn with_handle(
        handle: Handle,
        name: impl Into<String>,
        delay: Duration,
        work: impl ThrottledWork,
    ) -> Self {
        Self {
            inner: Arc::new(GateInner {
                name: name.into(),
                delay,
                handle,
                work: Box::new(work),
                state: Mutex::new(GateState {
                    phase: Phase::Idle,
                    rerun_requested: false,
                    last_run: None,
                    next_ticket: 0,
                    runs: 0,
                }),
            }),
        }
    }

    pub fn delay(&self) -> Duration {
        self.inner.delay
    }

    pub fn phase(&self) -> GatePhase {
        match self.inner.lock().phase {
            Phase::Idle => GatePhase::Idle,
            Phase::Immediate => GatePhase::PendingImmediate,
            Phase::Scheduled { .. } => GatePhase::PendingScheduled,
            Phase::Running => GatePhase::Running,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.phase() != GatePhase::Idle
    }

    /// Number of runs that have finished, successfully or not.
    pub fn runs(&self) -> u64 {
        self.inner.lock().runs
    }

    /// Ask for the work to run.
    ///
    /// Runs it on the calling thread when the throttle window has passed,
    /// otherwise defers it to the blocking pool once the window ends.
    pub fn request_run(&self) -> RunDisposition {
        {
            let mut state = self.inner.lock();
            match state.phase {
                Phase::Idle => {}
                Phase::Scheduled { .. } => {
                    tracing::trace!("{}: request absorbed into pending run", self.inner.name);
                    return RunDisposition::Absorbed;
                }
                Phase::Immediate | Phase::Running => {
                    state.rerun_requested = true;
                    tracing::trace!("{}: follow-up run requested", self.inner.name);
                    return RunDisposition::Absorbed;
                }
            }

            let now = Instant::now();
            let wait = state
                .last_run
                .map(|last| (last + self.inner.delay).saturating_duration_since(now))
                .unwrap_or(Duration::ZERO);

            if !wait.is_zero() {
                self.inner.schedule(&mut state, wait);
                return RunDisposition::Scheduled(wait);
            }

            state.phase = Phase::Immediate;
        }

        self.inner.execute();
        RunDisposition::RanImmediately
    }

    /// Mark the executing run as finished and restart the throttle window.
    ///
    /// Runs started by the gate call this themselves, including when the work
    /// fails or panics. Calling it while idle is harmless; a run that is still
    /// waiting for its window is kept.
    pub fn on_run_finished(&self) {
        self.inner.mark_finished();
    }

    /// Drop a deferred run that has not started yet, and any follow-up
    /// requested during the current run.
    ///
    /// Returns `false` when nothing was waiting; a run already executing is
    /// left alone.
    pub fn cancel(&self) -> bool {
        let mut state = self.inner.lock();
        let follow_up = std::mem::take(&mut state.rerun_requested);
        if !matches!(state.phase, Phase::Scheduled { .. }) {
            return follow_up;
        }
        if let Phase::Scheduled { task, .. } = std::mem::replace(&mut state.phase, Phase::Idle) {
            task.abort();
        }
        tracing::debug!("{}: scheduled run cancelled", self.inner.name);
        true
    }
}

impl Drop for ThrottleGate {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl GateInner {
    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn schedule(self: &Arc<Self>, state: &mut GateState, wait: Duration) {
        let ticket = state.next_ticket;
        state.next_ticket += 1;
        let inner = Arc::clone(self);
        let task = self.handle.spawn(async move {
            tokio::time::sleep(wait).await;
            GateInner::run_scheduled(inner, ticket).await;
        });
        state.phase = Phase::Scheduled { ticket, task };
        tracing::debug!("{}: run scheduled in {:?}", self.name, wait);
    }

    async fn run_scheduled(inner: Arc<GateInner>, ticket: u64) {
        {
            let mut state = inner.lock();
            // Cancelled, or replaced by a newer schedule.
            let current = matches!(state.phase, Phase::Scheduled { ticket: t, .. } if t == ticket);
            if !current {
                return;
            }
            state.phase = Phase::Running;
        }

        let worker = Arc::clone(&inner);
        if let Err(e) = tokio::task::spawn_blocking(move || worker.execute()).await {
            tracing::error!("{}: throttled run aborted: {}", inner.name, e);
        }
    }

    fn execute(self: &Arc<Self>) {
        let _finish = FinishGuard(self);
        if let Err(e) = self.work.run() {
            tracing::warn!("{}: throttled work failed: {:#}", self.name, e);
        }
    }

    fn mark_finished(self: &Arc<Self>) {
        let mut state = self.lock();
        self.close_run(&mut state);
    }

    fn finish_run(self: &Arc<Self>) {
        let mut state = self.lock();
        self.close_run(&mut state);
        state.runs += 1;
    }

    /// Leaves a scheduled run in place; the work may have closed its own run
    /// and a new one been scheduled since.
    fn close_run(self: &Arc<Self>, state: &mut GateState) {
        let now = Instant::now();
        if matches!(state.phase, Phase::Immediate | Phase::Running) {
            state.phase = Phase::Idle;
            if std::mem::take(&mut state.rerun_requested) {
                self.schedule(state, self.delay);
            }
        }
        state.last_run = Some(now);
    }
}

/// Closes a run even when the work unwinds.
struct FinishGuard<'a>(&'a Arc<GateInner>);

impl Drop for FinishGuard<'_> {
    fn drop(&mut self) {
        self.0.finish_run();
    }
}
