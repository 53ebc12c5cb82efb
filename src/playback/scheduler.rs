//! Delayed, cancellable ticks.
//!
//! The controller never sleeps or spawns. It asks a [`Scheduler`] for a tick
//! after a delay and the host calls
//! [`PlaybackController::on_tick`](super::PlaybackController::on_tick) with
//! the returned handle when it fires.
//!
//! [`VirtualScheduler`] is a deterministic implementation over virtual time:
//! - ticks fire in due-time order
//! - ties are broken by scheduling order (sequence number)
//! - time only moves when the owner calls [`VirtualScheduler::advance`]

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

/// Opaque identifier of one scheduled tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Wrap a raw id (for host schedulers that mint their own).
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Raw id.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Host timer facility injected into the playback controller.
pub trait Scheduler {
    /// Arrange for a tick after `delay`; the handle identifies it.
    fn schedule(&mut self, delay: Duration) -> TimerHandle;

    /// Cancel a pending tick. Unknown or already fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

/// A pending tick ordered by (due, sequence).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct PendingTick {
    due: Duration,
    sequence: u64,
}

/// Deterministic scheduler driven by explicit time advancement.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use algotrace::playback::{Scheduler, VirtualScheduler};
///
/// let mut scheduler = VirtualScheduler::new();
/// let late = scheduler.schedule(Duration::from_millis(300));
/// let early = scheduler.schedule(Duration::from_millis(100));
///
/// assert_eq!(scheduler.advance(Duration::from_millis(500)), vec![early, late]);
/// ```
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    /// Current virtual time.
    now: Duration,
    /// Min-heap ordered by (due, sequence).
    queue: BinaryHeap<Reverse<PendingTick>>,
    /// Monotonic sequence counter, doubles as the handle id.
    sequence: u64,
}

impl VirtualScheduler {
    /// Create a scheduler at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending ticks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Check if nothing is pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Due time of the earliest pending tick.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.peek().map(|Reverse(t)| t.due)
    }

    /// Move time forward by `by`, returning every tick that came due, in
    /// firing order.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerHandle> {
        let until = self.now.saturating_add(by);
        let mut fired = Vec::new();
        while let Some(Reverse(tick)) = self.queue.peek() {
            if tick.due > until {
                break;
            }
            let tick = *tick;
            self.queue.pop();
            fired.push(TimerHandle(tick.sequence));
        }
        self.now = until;
        fired
    }

    /// Jump straight to the earliest pending tick and fire it.
    pub fn fire_next(&mut self) -> Option<TimerHandle> {
        let Reverse(tick) = self.queue.pop()?;
        self.now = self.now.max(tick.due);
        Some(TimerHandle(tick.sequence))
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerHandle {
        let sequence = self.sequence;
        self.sequence += 1;
        self.queue.push(Reverse(PendingTick {
            due: self.now.saturating_add(delay),
            sequence,
        }));
        TimerHandle(sequence)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.queue.retain(|Reverse(t)| t.sequence != handle.0);
    }
}
