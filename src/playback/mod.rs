//! Playback controller: a state machine over a finished trace.
//!
//! ```text
//! Idle ──load──▶ Ready ──play──▶ Running ◀──play── Paused
//!                  ▲  │            │  └────pause────▶ ▲ │
//!                  │  └──step/seek off 0──────────────┘ │
//!                  └────reset──────┴────────────────────┘
//!                            Running ──last index──▶ Finished
//! ```
//!
//! The controller owns the current index and at most one pending tick.
//! Every manual action cancels the pending tick before touching the index;
//! a tick carrying any other handle is stale and ignored.

mod scheduler;

pub use scheduler::{Scheduler, TimerHandle, VirtualScheduler};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, trace};

use crate::config::PlaybackConfig;
use crate::trace::{Step, Trace};

/// Playback lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// No trace loaded.
    Idle,
    /// Trace loaded at step 0, not yet playing.
    Ready,
    /// Advancing on each tick.
    Running,
    /// Stopped mid-trace.
    Paused,
    /// At the last step.
    Finished,
}

/// What a renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct PlaybackView<'a, S> {
    /// Current step index.
    pub index: usize,
    /// Number of steps in the trace.
    pub total: usize,
    /// Controller state.
    pub state: PlaybackState,
    /// Delay between automatic steps.
    pub speed_ms: u64,
    /// Step at `index`.
    pub step: &'a Step<S>,
}

impl<S> PlaybackView<'_, S> {
    /// Position in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.total <= 1 {
            1.0
        } else {
            self.index as f64 / (self.total - 1) as f64
        }
    }
}

/// Render callback invoked after every index or state change.
pub type Observer<S> = Box<dyn FnMut(PlaybackView<'_, S>)>;

/// Steps through a trace manually or on a timer.
pub struct PlaybackController<S, Sch: Scheduler> {
    trace: Option<Trace<S>>,
    index: usize,
    state: PlaybackState,
    speed_ms: u64,
    config: PlaybackConfig,
    scheduler: Sch,
    pending: Option<TimerHandle>,
    observer: Option<Observer<S>>,
}

impl<S, Sch: Scheduler + fmt::Debug> fmt::Debug for PlaybackController<S, Sch> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackController")
            .field("steps", &self.trace.as_ref().map(Trace::len))
            .field("index", &self.index)
            .field("state", &self.state)
            .field("speed_ms", &self.speed_ms)
            .field("pending", &self.pending)
            .field("scheduler", &self.scheduler)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl<S, Sch: Scheduler> PlaybackController<S, Sch> {
    /// Create an idle controller with default playback settings.
    #[must_use]
    pub fn new(scheduler: Sch) -> Self {
        Self::with_config(scheduler, PlaybackConfig::default())
    }

    /// Create an idle controller with the given playback settings.
    #[must_use]
    pub fn with_config(scheduler: Sch, config: PlaybackConfig) -> Self {
        let speed_ms = config.clamp_speed(config.speed_ms);
        Self {
            trace: None,
            index: 0,
            state: PlaybackState::Idle,
            speed_ms,
            config,
            scheduler,
            pending: None,
            observer: None,
        }
    }

    /// Install the render callback. It is called immediately if a trace is
    /// loaded.
    pub fn set_observer(&mut self, observer: impl FnMut(PlaybackView<'_, S>) + 'static) {
        self.observer = Some(Box::new(observer));
        self.notify();
    }

    /// Remove the render callback.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    // ===== Accessors =====

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    /// Current step index.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.index
    }

    /// Whether ticks are advancing the index.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Running
    }

    /// Delay between automatic steps.
    #[must_use]
    pub const fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    /// Loaded trace.
    #[must_use]
    pub const fn trace(&self) -> Option<&Trace<S>> {
        self.trace.as_ref()
    }

    /// Step at the current index.
    #[must_use]
    pub fn current_step(&self) -> Option<&Step<S>> {
        self.trace.as_ref().and_then(|t| t.get(self.index))
    }

    /// Render projection of the current position.
    #[must_use]
    pub fn view(&self) -> Option<PlaybackView<'_, S>> {
        let trace = self.trace.as_ref()?;
        make_view(trace, self.index, self.state, self.speed_ms)
    }

    /// Handle of the pending tick, if any.
    #[must_use]
    pub const fn pending_tick(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// Injected scheduler.
    #[must_use]
    pub const fn scheduler(&self) -> &Sch {
        &self.scheduler
    }

    /// Injected scheduler, for hosts that drive time themselves.
    pub fn scheduler_mut(&mut self) -> &mut Sch {
        &mut self.scheduler
    }

    // ===== Transitions =====

    /// Replace the trace and rewind to step 0 (any state → Ready).
    ///
    /// An empty trace leaves the controller Idle.
    pub fn load(&mut self, trace: Trace<S>) {
        self.cancel_pending();
        self.index = 0;
        if trace.is_empty() {
            debug!("load: empty trace, staying idle");
            self.trace = None;
            self.state = PlaybackState::Idle;
            return;
        }
        debug!(algorithm = %trace.algorithm(), steps = trace.len(), "load");
        self.trace = Some(trace);
        self.state = PlaybackState::Ready;
        self.notify();
        if self.config.auto_play {
            self.play();
        }
    }

    /// Start or resume automatic stepping (Ready/Paused → Running).
    ///
    /// No-op when idle, finished or already running.
    pub fn play(&mut self) {
        if !matches!(self.state, PlaybackState::Ready | PlaybackState::Paused) {
            trace!(state = ?self.state, "play ignored");
            return;
        }
        if self.at_last() {
            self.transition(PlaybackState::Finished);
            self.notify();
            return;
        }
        self.transition(PlaybackState::Running);
        self.arm();
        self.notify();
    }

    /// Stop automatic stepping (Running → Paused).
    pub fn pause(&mut self) {
        if self.state != PlaybackState::Running {
            return;
        }
        self.cancel_pending();
        self.transition(PlaybackState::Paused);
        self.notify();
    }

    /// Advance one step in any state. Returns whether the index moved.
    ///
    /// Leaving step 0 from Ready pauses the controller.
    pub fn step_forward(&mut self) -> bool {
        let Some(len) = self.trace.as_ref().map(Trace::len) else {
            return false;
        };
        if self.index + 1 >= len {
            return false;
        }
        self.cancel_pending();
        self.index += 1;
        self.settle();
        true
    }

    /// Go back one step. Leaving the last step turns Finished into Paused.
    /// Returns whether the index moved.
    pub fn step_backward(&mut self) -> bool {
        if self.trace.is_none() || self.index == 0 {
            return false;
        }
        self.cancel_pending();
        self.index -= 1;
        self.settle();
        true
    }

    /// Jump to `index`, clamped to the last step. Returns the new index.
    pub fn seek(&mut self, index: usize) -> usize {
        let Some(len) = self.trace.as_ref().map(Trace::len) else {
            return 0;
        };
        self.cancel_pending();
        self.index = index.min(len - 1);
        self.settle();
        self.index
    }

    /// Rewind to step 0 and stop (→ Ready).
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.index = 0;
        if self.trace.is_some() {
            self.transition(PlaybackState::Ready);
        }
        self.notify();
    }

    /// Set the delay between automatic steps, clamped to the configured
    /// bounds. A pending tick keeps its delay; the next one uses the new
    /// speed. Returns the applied value.
    pub fn set_speed_ms(&mut self, ms: u64) -> u64 {
        self.speed_ms = self.config.clamp_speed(ms);
        debug!(requested = ms, applied = self.speed_ms, "speed changed");
        self.speed_ms
    }

    /// Handle a fired tick. Returns whether it advanced the index.
    ///
    /// Ticks that are not the pending one, or that arrive while not
    /// running, are ignored.
    pub fn on_tick(&mut self, handle: TimerHandle) -> bool {
        if self.pending != Some(handle) {
            trace!(handle = handle.raw(), "stale tick ignored");
            return false;
        }
        self.pending = None;
        if self.state != PlaybackState::Running {
            return false;
        }
        let Some(len) = self.trace.as_ref().map(Trace::len) else {
            return false;
        };
        if self.index + 1 < len {
            self.index += 1;
        }
        trace!(index = self.index, "tick");
        self.settle();
        true
    }

    // ===== Internals =====

    fn at_last(&self) -> bool {
        self.trace
            .as_ref()
            .map_or(true, |trace| self.index + 1 >= trace.len())
    }

    /// Reconcile state and timer with a new index, then notify.
    fn settle(&mut self) {
        if self.at_last() {
            self.cancel_pending();
            self.transition(PlaybackState::Finished);
        } else if self.state == PlaybackState::Finished
            || (self.state == PlaybackState::Ready && self.index > 0)
        {
            self.transition(PlaybackState::Paused);
        } else if self.state == PlaybackState::Running {
            self.arm();
        }
        self.notify();
    }

    fn arm(&mut self) {
        self.cancel_pending();
        let handle = self
            .scheduler
            .schedule(Duration::from_millis(self.speed_ms));
        trace!(handle = handle.raw(), delay_ms = self.speed_ms, "tick scheduled");
        self.pending = Some(handle);
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn transition(&mut self, next: PlaybackState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, index = self.index, "playback state");
            self.state = next;
        }
    }

    fn notify(&mut self) {
        let (Some(observer), Some(trace)) = (self.observer.as_mut(), self.trace.as_ref()) else {
            return;
        };
        if let Some(view) = make_view(trace, self.index, self.state, self.speed_ms) {
            observer(view);
        }
    }
}

impl<S> PlaybackController<S, VirtualScheduler> {
    /// Fire ticks in virtual time until nothing is pending. Returns the
    /// number of ticks that advanced the index.
    pub fn run_until_idle(&mut self) -> usize {
        let mut advanced = 0;
        while let Some(handle) = self.scheduler.fire_next() {
            if self.on_tick(handle) {
                advanced += 1;
            }
        }
        advanced
    }
}

fn make_view<S>(
    trace: &Trace<S>,
    index: usize,
    state: PlaybackState,
    speed_ms: u64,
) -> Option<PlaybackView<'_, S>> {
    Some(PlaybackView {
        index,
        total: trace.len(),
        state,
        speed_ms,
        step: trace.get(index)?,
    })
}
