//! One-shot scroll reveals
//!
//! A [`RevealTrigger`] watches content blocks through an injected
//! [`IntersectionHost`] and flips each one from [`Visibility::Hidden`] to
//! [`Visibility::Visible`] the first time the host reports it as
//! intersecting the viewport. The flip never reverts; once a block is
//! visible the trigger stops observing it.
//!
//! # Example
//!
//! ```rust
//! use folio_animation::{ElementId, RevealTrigger, SimulatedViewport, DEFAULT_REVEAL_THRESHOLD};
//! use folio_core::Rect;
//! use std::sync::Arc;
//!
//! let viewport = Arc::new(SimulatedViewport::new(1280.0, 800.0));
//! viewport.place(ElementId(1), Rect::new(0.0, 1200.0, 1280.0, 600.0));
//!
//! let trigger = RevealTrigger::new(viewport.clone(), DEFAULT_REVEAL_THRESHOLD).unwrap();
//! trigger.observe(ElementId(1));
//! assert!(!trigger.is_visible(ElementId(1)));
//!
//! viewport.scroll_to(500.0);
//! assert!(trigger.is_visible(ElementId(1)));
//!
//! viewport.scroll_to(0.0);
//! assert!(trigger.is_visible(ElementId(1)));
//! ```

use folio_core::sync::lock;
use rustc_hash::FxHashMap;
use slotmap::new_key_type;
use smallvec::SmallVec;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock, Weak};
use thiserror::Error;

/// Fraction of a block that must be in view before it reveals
pub const DEFAULT_REVEAL_THRESHOLD: f32 = 0.1;

/// Host-side identity of an observable element
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

new_key_type! {
    /// Observer registered with an [`IntersectionHost`]
    pub struct ObserverId;
}

/// One element's intersection state as reported by the host
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub is_intersecting: bool,
    /// Visible fraction of the element, `0.0..=1.0`
    pub ratio: f32,
}

/// Called by the host with a batch of changed entries
pub type IntersectionCallback = Arc<dyn Fn(&[IntersectionEntry]) + Send + Sync>;

/// Called once per element when it becomes visible
pub type RevealListener = Arc<dyn Fn(ElementId) + Send + Sync>;

/// Viewport observation capability supplied by the host
///
/// Hosts must not hold internal locks while invoking callbacks; a callback
/// may call back into the host (to unobserve, for instance).
pub trait IntersectionHost: Send + Sync {
    fn create_observer(&self, threshold: f32, callback: IntersectionCallback) -> ObserverId;

    fn observe(&self, observer: ObserverId, target: ElementId);

    fn unobserve(&self, observer: ObserverId, target: ElementId);

    /// Drop the observer and every registration it holds
    fn disconnect(&self, observer: ObserverId);
}

/// Host without viewport observation; targets stay hidden
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopIntersectionHost;

impl IntersectionHost for NoopIntersectionHost {
    fn create_observer(&self, _threshold: f32, _callback: IntersectionCallback) -> ObserverId {
        tracing::debug!("NoopIntersectionHost - observation unavailable, reveals disabled");
        ObserverId::default()
    }

    fn observe(&self, _observer: ObserverId, _target: ElementId) {}

    fn unobserve(&self, _observer: ObserverId, _target: ElementId) {}

    fn disconnect(&self, _observer: ObserverId) {}
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RevealError {
    #[error("reveal threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f32),
}

/// Reveal state of a block
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

#[derive(Default)]
struct TriggerShared {
    targets: Mutex<FxHashMap<ElementId, Visibility>>,
    listeners: Mutex<SmallVec<[RevealListener; 2]>>,
}

impl TriggerShared {
    /// Mark intersecting entries visible; returns the newly revealed ones
    fn apply(&self, entries: &[IntersectionEntry]) -> SmallVec<[ElementId; 4]> {
        let mut revealed = SmallVec::new();
        let mut targets = lock(&self.targets);
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            if let Some(visibility) = targets.get_mut(&entry.target) {
                if *visibility == Visibility::Hidden {
                    *visibility = Visibility::Visible;
                    revealed.push(entry.target);
                }
            }
        }
        revealed
    }

    /// Reveal, release the host registrations, then tell listeners.
    /// Returns how many blocks revealed.
    fn apply_and_notify(
        &self,
        entries: &[IntersectionEntry],
        registration: Option<(&dyn IntersectionHost, ObserverId)>,
    ) -> usize {
        let revealed = self.apply(entries);
        if revealed.is_empty() {
            return 0;
        }

        // One-shot: nothing left to watch for these blocks
        if let Some((host, observer)) = registration {
            for element in &revealed {
                host.unobserve(observer, *element);
            }
        }

        let listeners: SmallVec<[RevealListener; 2]> =
            lock(&self.listeners).iter().cloned().collect();
        for element in &revealed {
            tracing::debug!("RevealTrigger - {:?} revealed", element);
            for listener in &listeners {
                listener(*element);
            }
        }
        revealed.len()
    }
}

/// Owns one host observer and the reveal state of every block it watches
pub struct RevealTrigger {
    host: Arc<dyn IntersectionHost>,
    observer: ObserverId,
    threshold: f32,
    shared: Arc<TriggerShared>,
    disposed: AtomicBool,
}

impl RevealTrigger {
    pub fn new(host: Arc<dyn IntersectionHost>, threshold: f32) -> Result<Self, RevealError> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(RevealError::InvalidThreshold(threshold));
        }

        let shared = Arc::new(TriggerShared::default());
        let observer_cell: Arc<OnceLock<ObserverId>> = Arc::new(OnceLock::new());

        let callback: IntersectionCallback = {
            let shared = shared.clone();
            let host: Weak<dyn IntersectionHost> = Arc::downgrade(&host);
            let observer_cell = observer_cell.clone();
            Arc::new(move |entries: &[IntersectionEntry]| {
                let host = host.upgrade();
                let registration = host.as_deref().zip(observer_cell.get().copied());
                shared.apply_and_notify(entries, registration);
            })
        };

        let observer = host.create_observer(threshold, callback);
        let _ = observer_cell.set(observer);

        Ok(Self {
            host,
            observer,
            threshold,
            shared,
            disposed: AtomicBool::new(false),
        })
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Start watching `element`; it begins hidden
    pub fn observe(&self, element: ElementId) {
        if self.disposed.load(Ordering::SeqCst) {
            tracing::warn!("RevealTrigger::observe - {:?} after dispose, ignoring", element);
            return;
        }

        let inserted = {
            let mut targets = lock(&self.shared.targets);
            if targets.contains_key(&element) {
                false
            } else {
                targets.insert(element, Visibility::Hidden);
                true
            }
        };

        // The host may report synchronously; the targets lock is released
        if inserted {
            self.host.observe(self.observer, element);
        }
    }

    /// Register a listener called once per block as it reveals
    pub fn on_reveal<F>(&self, listener: F)
    where
        F: Fn(ElementId) + Send + Sync + 'static,
    {
        lock(&self.shared.listeners).push(Arc::new(listener));
    }

    /// Feed a batch of entries directly, as a host callback would
    pub fn handle_entries(&self, entries: &[IntersectionEntry]) -> usize {
        self.shared
            .apply_and_notify(entries, Some((self.host.as_ref(), self.observer)))
    }

    /// `None` for elements this trigger never observed
    pub fn visibility(&self, element: ElementId) -> Option<Visibility> {
        lock(&self.shared.targets).get(&element).copied()
    }

    pub fn is_visible(&self, element: ElementId) -> bool {
        self.visibility(element) == Some(Visibility::Visible)
    }

    pub fn visible_count(&self) -> usize {
        lock(&self.shared.targets)
            .values()
            .filter(|v| **v == Visibility::Visible)
            .count()
    }

    pub fn target_count(&self) -> usize {
        lock(&self.shared.targets).len()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Release the host observer. Reveal state stays readable.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.host.disconnect(self.observer);
        tracing::debug!("RevealTrigger::dispose - observer disconnected");
    }
}

impl Drop for RevealTrigger {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    /// Records registrations; entries are pushed by the test
    #[derive(Default)]
    struct FakeHost {
        observers: Mutex<SlotMap<ObserverId, IntersectionCallback>>,
        observed: Mutex<Vec<ElementId>>,
        disconnects: Mutex<usize>,
    }

    impl FakeHost {
        fn notify(&self, entries: &[IntersectionEntry]) {
            let callbacks: Vec<IntersectionCallback> =
                lock(&self.observers).values().cloned().collect();
            for callback in callbacks {
                callback(entries);
            }
        }
    }

    impl IntersectionHost for FakeHost {
        fn create_observer(&self, _threshold: f32, callback: IntersectionCallback) -> ObserverId {
            lock(&self.observers).insert(callback)
        }

        fn observe(&self, _observer: ObserverId, target: ElementId) {
            lock(&self.observed).push(target);
        }

        fn unobserve(&self, _observer: ObserverId, target: ElementId) {
            lock(&self.observed).retain(|t| *t != target);
        }

        fn disconnect(&self, observer: ObserverId) {
            lock(&self.observers).remove(observer);
            lock(&self.observed).clear();
            *lock(&self.disconnects) += 1;
        }
    }

    fn entry(id: u64, is_intersecting: bool) -> IntersectionEntry {
        IntersectionEntry {
            target: ElementId(id),
            is_intersecting,
            ratio: if is_intersecting { 0.5 } else { 0.0 },
        }
    }

    #[test]
    fn test_rejects_bad_thresholds() {
        let host: Arc<dyn IntersectionHost> = Arc::new(NoopIntersectionHost);
        for bad in [0.0, -0.1, 1.5, f32::NAN] {
            assert!(RevealTrigger::new(host.clone(), bad).is_err());
        }
        assert!(RevealTrigger::new(host, 1.0).is_ok());
    }

    #[test]
    fn test_reveal_never_reverts() {
        let host = Arc::new(FakeHost::default());
        let trigger = RevealTrigger::new(host.clone(), DEFAULT_REVEAL_THRESHOLD).unwrap();
        trigger.observe(ElementId(7));
        assert_eq!(trigger.visibility(ElementId(7)), Some(Visibility::Hidden));

        host.notify(&[entry(7, true)]);
        assert!(trigger.is_visible(ElementId(7)));
        assert!(lock(&host.observed).is_empty());

        host.notify(&[entry(7, false)]);
        assert!(trigger.is_visible(ElementId(7)));
    }

    #[test]
    fn test_non_intersecting_entries_change_nothing() {
        let host = Arc::new(FakeHost::default());
        let trigger = RevealTrigger::new(host.clone(), DEFAULT_REVEAL_THRESHOLD).unwrap();
        trigger.observe(ElementId(1));
        trigger.observe(ElementId(2));

        host.notify(&[entry(1, false), entry(2, true), entry(99, true)]);
        assert!(!trigger.is_visible(ElementId(1)));
        assert!(trigger.is_visible(ElementId(2)));
        assert_eq!(trigger.visibility(ElementId(99)), None);
        assert_eq!(trigger.visible_count(), 1);
        assert_eq!(*lock(&host.observed), vec![ElementId(1)]);
    }

    #[test]
    fn test_listeners_fire_once_per_block() {
        let host = Arc::new(FakeHost::default());
        let trigger = RevealTrigger::new(host.clone(), DEFAULT_REVEAL_THRESHOLD).unwrap();
        let revealed = Arc::new(Mutex::new(Vec::new()));
        let sink = revealed.clone();
        trigger.on_reveal(move |id| lock(&sink).push(id));
        trigger.observe(ElementId(3));

        host.notify(&[entry(3, true)]);
        host.notify(&[entry(3, true)]);
        assert_eq!(*lock(&revealed), vec![ElementId(3)]);
    }

    #[test]
    fn test_dispose_is_idempotent_and_runs_on_drop() {
        let host = Arc::new(FakeHost::default());
        {
            let trigger = RevealTrigger::new(host.clone(), DEFAULT_REVEAL_THRESHOLD).unwrap();
            trigger.observe(ElementId(1));
            trigger.dispose();
            trigger.dispose();
            assert!(trigger.is_disposed());

            trigger.observe(ElementId(2));
            assert_eq!(trigger.target_count(), 1);
        }
        assert_eq!(*lock(&host.disconnects), 1);
        assert!(lock(&host.observers).is_empty());
    }

    #[test]
    fn test_noop_host_leaves_targets_hidden() {
        let trigger =
            RevealTrigger::new(Arc::new(NoopIntersectionHost), DEFAULT_REVEAL_THRESHOLD).unwrap();
        trigger.observe(ElementId(1));
        assert_eq!(trigger.visibility(ElementId(1)), Some(Visibility::Hidden));
        assert_eq!(trigger.handle_entries(&[entry(1, true)]), 1);
        assert!(trigger.is_visible(ElementId(1)));
    }

    #[test]
    fn test_direct_entries_notify_listeners() {
        let trigger =
            RevealTrigger::new(Arc::new(NoopIntersectionHost), DEFAULT_REVEAL_THRESHOLD).unwrap();
        let revealed = Arc::new(Mutex::new(Vec::new()));
        let sink = revealed.clone();
        trigger.on_reveal(move |id| lock(&sink).push(id));
        trigger.observe(ElementId(1));

        assert_eq!(trigger.handle_entries(&[entry(1, true)]), 1);
        assert_eq!(trigger.handle_entries(&[entry(1, true)]), 0);
        assert_eq!(*lock(&revealed), vec![ElementId(1)]);
    }
}
