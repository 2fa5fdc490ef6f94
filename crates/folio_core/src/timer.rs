//! Timer scheduling capability
//!
//! Animations never sleep on their own. They ask an injected
//! [`TimerScheduler`] for a one-shot continuation and keep the returned
//! [`TimerId`] so the continuation can be cancelled on teardown.
//!
//! Two implementations are provided:
//!
//! - [`VirtualTimers`]: a deterministic virtual clock advanced by hand
//! - [`TokioTimers`]: real-time timers on a tokio runtime (feature `tokio-timers`)

use crate::sync::lock;
use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

new_key_type! {
    /// Handle to a scheduled one-shot timer
    pub struct TimerId;
}

/// Continuation run when a timer fires
pub type TimerCallback = Box<dyn FnOnce() + Send + 'static>;

/// Shared scheduler handle passed down to components
pub type SharedScheduler = Arc<dyn TimerScheduler>;

/// One-shot timer scheduling capability
pub trait TimerScheduler: Send + Sync {
    /// Run `callback` once after `delay`
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerId;

    /// Cancel a pending timer. Returns `false` if it already fired or was cancelled.
    fn cancel(&self, id: TimerId) -> bool;

    /// Number of timers still waiting to fire
    fn pending(&self) -> usize;
}

/// Cancels its timer when dropped
pub struct TimerGuard {
    scheduler: SharedScheduler,
    id: Option<TimerId>,
}

impl TimerGuard {
    pub fn new(scheduler: SharedScheduler, id: TimerId) -> Self {
        Self {
            scheduler,
            id: Some(id),
        }
    }

    pub fn id(&self) -> Option<TimerId> {
        self.id
    }

    /// Cancel now instead of on drop
    pub fn cancel(&mut self) -> bool {
        match self.id.take() {
            Some(id) => self.scheduler.cancel(id),
            None => false,
        }
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.cancel();
    }
}

// ============================================================================
// Virtual clock
// ============================================================================

struct PendingTimer {
    due: Duration,
    seq: u64,
    callback: TimerCallback,
}

#[derive(Default)]
struct VirtualClock {
    now: Duration,
    next_seq: u64,
    timers: SlotMap<TimerId, PendingTimer>,
}

/// Deterministic scheduler driven by [`VirtualTimers::advance`]
///
/// Timers fire in `(due, scheduling order)` order. Callbacks run without the
/// clock lock held, so they may schedule or cancel further timers; any timer
/// they schedule that falls inside the current advance window fires in the
/// same call.
#[derive(Default)]
pub struct VirtualTimers {
    clock: Mutex<VirtualClock>,
}

impl VirtualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle usable as a [`SharedScheduler`]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Current virtual time since creation
    pub fn now(&self) -> Duration {
        lock(&self.clock).now
    }

    /// Due time of the earliest pending timer
    pub fn next_due(&self) -> Option<Duration> {
        lock(&self.clock).timers.values().map(|t| t.due).min()
    }

    /// Advance the clock, firing every timer that comes due. Returns the number fired.
    pub fn advance(&self, by: Duration) -> usize {
        let target = lock(&self.clock).now + by;
        let mut fired = 0;

        loop {
            let callback = {
                let mut clock = lock(&self.clock);
                let next = clock
                    .timers
                    .iter()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(id, _)| id);

                match next.and_then(|id| clock.timers.remove(id)) {
                    Some(timer) => {
                        clock.now = clock.now.max(timer.due);
                        timer.callback
                    }
                    None => {
                        clock.now = target;
                        break;
                    }
                }
            };

            callback();
            fired += 1;
        }

        tracing::trace!("VirtualTimers::advance by {:?}: fired {}", by, fired);
        fired
    }

    /// Advance until no timers remain or `limit` elapses
    pub fn run_until_idle(&self, limit: Duration) -> usize {
        let start = self.now();
        let mut fired = 0;
        while let Some(due) = self.next_due() {
            if due > start + limit {
                break;
            }
            let now = self.now();
            fired += self.advance(due.saturating_sub(now));
        }
        fired
    }
}

impl TimerScheduler for VirtualTimers {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerId {
        let mut clock = lock(&self.clock);
        let due = clock.now + delay;
        let seq = clock.next_seq;
        clock.next_seq += 1;
        clock.timers.insert(PendingTimer { due, seq, callback })
    }

    fn cancel(&self, id: TimerId) -> bool {
        lock(&self.clock).timers.remove(id).is_some()
    }

    fn pending(&self) -> usize {
        lock(&self.clock).timers.len()
    }
}

// ============================================================================
// Tokio adapter
// ============================================================================

#[cfg(feature = "tokio-timers")]
pub use tokio_timers::TokioTimers;

#[cfg(feature = "tokio-timers")]
mod tokio_timers {
    use super::*;
    use tokio::runtime::Handle;
    use tokio::task::AbortHandle;

    type TaskTable = Arc<Mutex<SlotMap<TimerId, Option<AbortHandle>>>>;

    /// Real-time scheduler spawning one sleeping task per timer
    pub struct TokioTimers {
        handle: Handle,
        tasks: TaskTable,
    }

    impl TokioTimers {
        pub fn new(handle: Handle) -> Self {
            Self {
                handle,
                tasks: Arc::new(Mutex::new(SlotMap::with_key())),
            }
        }

        /// Bind to the runtime of the calling context, if any
        pub fn try_current() -> Option<Self> {
            Handle::try_current().ok().map(Self::new)
        }
    }

    impl TimerScheduler for TokioTimers {
        fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerId {
            let id = lock(&self.tasks).insert(None);
            let tasks = self.tasks.clone();

            let join = self.handle.spawn(async move {
                tokio::time::sleep(delay).await;
                // A cancelled timer has already been removed from the table
                let live = lock(&tasks).remove(id).is_some();
                if live {
                    callback();
                }
            });

            if let Some(slot) = lock(&self.tasks).get_mut(id) {
                *slot = Some(join.abort_handle());
            }
            id
        }

        fn cancel(&self, id: TimerId) -> bool {
            match lock(&self.tasks).remove(id) {
                Some(abort) => {
                    if let Some(abort) = abort {
                        abort.abort();
                    }
                    true
                }
                None => false,
            }
        }

        fn pending(&self) -> usize {
            lock(&self.tasks).len()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, impl Fn(&'static str) -> TimerCallback) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let log_clone = log.clone();
        let make = move |name: &'static str| -> TimerCallback {
            let log = log_clone.clone();
            Box::new(move || log.lock().unwrap().push(name))
        };
        (log, make)
    }

    #[test]
    fn test_fires_in_due_order() {
        let timers = VirtualTimers::new();
        let (log, make) = recorder();

        timers.schedule(Duration::from_millis(50), make("b"));
        timers.schedule(Duration::from_millis(10), make("a"));
        timers.schedule(Duration::from_millis(50), make("c"));

        assert_eq!(timers.advance(Duration::from_millis(100)), 3);
        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
        assert_eq!(timers.now(), Duration::from_millis(100));
    }

    #[test]
    fn test_cancel_prevents_fire() {
        let timers = VirtualTimers::new();
        let (log, make) = recorder();

        let id = timers.schedule(Duration::from_millis(10), make("cancelled"));
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));

        timers.advance(Duration::from_secs(1));
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_chained_timers_fire_within_window() {
        let timers = Arc::new(VirtualTimers::new());
        let count = Arc::new(AtomicUsize::new(0));

        fn chain(timers: Arc<VirtualTimers>, count: Arc<AtomicUsize>) {
            let next = timers.clone();
            timers.schedule(
                Duration::from_millis(100),
                Box::new(move || {
                    count.fetch_add(1, Ordering::SeqCst);
                    chain(next, count);
                }),
            );
        }

        chain(timers.clone(), count.clone());
        timers.advance(Duration::from_millis(350));
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.next_due(), Some(Duration::from_millis(400)));
    }

    #[test]
    fn test_guard_cancels_on_drop() {
        let timers: Arc<VirtualTimers> = VirtualTimers::shared();
        let (log, make) = recorder();

        let id = timers.schedule(Duration::from_millis(10), make("guarded"));
        {
            let _guard = TimerGuard::new(timers.clone(), id);
        }
        timers.advance(Duration::from_millis(20));
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(timers.pending(), 0);
    }

    #[cfg(feature = "tokio-timers")]
    #[tokio::test(start_paused = true)]
    async fn test_tokio_timers_fire_and_cancel() {
        let timers = TokioTimers::try_current().expect("inside runtime");
        let count = Arc::new(AtomicUsize::new(0));

        let fired = count.clone();
        timers.schedule(
            Duration::from_millis(150),
            Box::new(move || {
                fired.fetch_add(1, Ordering::SeqCst);
            }),
        );
        let cancelled = count.clone();
        let id = timers.schedule(
            Duration::from_millis(150),
            Box::new(move || {
                cancelled.fetch_add(10, Ordering::SeqCst);
            }),
        );
        assert!(timers.cancel(id));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(timers.pending(), 0);
    }
}
