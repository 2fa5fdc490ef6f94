//! Geometry-driven intersection host
//!
//! [`SimulatedViewport`] lays elements out as document-space rectangles and
//! reports intersections the way a browser observer would: every observer
//! hears about a target once when it starts watching it, and afterwards only
//! when the target crosses the observer's threshold in either direction.

use crate::reveal::{
    ElementId, IntersectionCallback, IntersectionEntry, IntersectionHost, ObserverId,
};
use folio_core::sync::lock;
use folio_core::Rect;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use std::sync::Mutex;

struct Observer {
    threshold: f32,
    callback: IntersectionCallback,
    /// Last reported intersecting state per target, `None` until first report
    targets: FxHashMap<ElementId, Option<bool>>,
}

struct ViewportState {
    width: f32,
    height: f32,
    scroll_y: f32,
    layout: FxHashMap<ElementId, Rect>,
    observers: SlotMap<ObserverId, Observer>,
}

impl ViewportState {
    fn visible_rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.height)
    }

    fn ratio(&self, element: ElementId) -> f32 {
        match self.layout.get(&element) {
            Some(bounds) => bounds.coverage_by(&self.visible_rect()),
            None => 0.0,
        }
    }

    /// Entries whose state changed, grouped per observer
    fn collect_changes(&mut self) -> Vec<(IntersectionCallback, Vec<IntersectionEntry>)> {
        let visible = self.visible_rect();
        let layout = &self.layout;
        let mut batches = Vec::new();

        for observer in self.observers.values_mut() {
            let mut entries = Vec::new();
            for (target, last) in observer.targets.iter_mut() {
                let ratio = layout
                    .get(target)
                    .map(|bounds| bounds.coverage_by(&visible))
                    .unwrap_or(0.0);
                let is_intersecting = ratio > 0.0 && ratio >= observer.threshold;
                if *last != Some(is_intersecting) {
                    *last = Some(is_intersecting);
                    entries.push(IntersectionEntry {
                        target: *target,
                        is_intersecting,
                        ratio,
                    });
                }
            }
            if !entries.is_empty() {
                entries.sort_by_key(|e| e.target);
                batches.push((observer.callback.clone(), entries));
            }
        }
        batches
    }
}

/// Scrollable viewport over a static layout
pub struct SimulatedViewport {
    state: Mutex<ViewportState>,
}

impl SimulatedViewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            state: Mutex::new(ViewportState {
                width,
                height,
                scroll_y: 0.0,
                layout: FxHashMap::default(),
                observers: SlotMap::with_key(),
            }),
        }
    }

    /// Set an element's document-space bounds
    pub fn place(&self, element: ElementId, bounds: Rect) {
        lock(&self.state).layout.insert(element, bounds);
        self.flush();
    }

    pub fn bounds(&self, element: ElementId) -> Option<Rect> {
        lock(&self.state).layout.get(&element).copied()
    }

    /// Scroll so the viewport's top edge sits at `y` (clamped at 0)
    pub fn scroll_to(&self, y: f32) {
        lock(&self.state).scroll_y = y.max(0.0);
        self.flush();
    }

    pub fn scroll_by(&self, dy: f32) {
        let y = self.scroll_y() + dy;
        self.scroll_to(y);
    }

    pub fn scroll_y(&self) -> f32 {
        lock(&self.state).scroll_y
    }

    pub fn resize(&self, width: f32, height: f32) {
        {
            let mut state = lock(&self.state);
            state.width = width;
            state.height = height;
        }
        self.flush();
    }

    pub fn visible_rect(&self) -> Rect {
        lock(&self.state).visible_rect()
    }

    /// Visible fraction of `element`; unplaced elements report `0.0`
    pub fn ratio(&self, element: ElementId) -> f32 {
        lock(&self.state).ratio(element)
    }

    /// Number of live (observer, target) registrations
    pub fn registrations(&self) -> usize {
        lock(&self.state)
            .observers
            .values()
            .map(|o| o.targets.len())
            .sum()
    }

    pub fn observer_count(&self) -> usize {
        lock(&self.state).observers.len()
    }

    /// Recompute intersections and deliver changes
    pub fn flush(&self) {
        let batches = lock(&self.state).collect_changes();
        for (callback, entries) in batches {
            tracing::trace!("SimulatedViewport - delivering {} entries", entries.len());
            callback(&entries);
        }
    }
}

impl IntersectionHost for SimulatedViewport {
    fn create_observer(&self, threshold: f32, callback: IntersectionCallback) -> ObserverId {
        lock(&self.state).observers.insert(Observer {
            threshold,
            callback,
            targets: FxHashMap::default(),
        })
    }

    fn observe(&self, observer: ObserverId, target: ElementId) {
        let registered = match lock(&self.state).observers.get_mut(observer) {
            Some(entry) => {
                entry.targets.entry(target).or_insert(None);
                true
            }
            None => false,
        };
        if registered {
            self.flush();
        } else {
            tracing::warn!("SimulatedViewport::observe - unknown observer {:?}", observer);
        }
    }

    fn unobserve(&self, observer: ObserverId, target: ElementId) {
        if let Some(entry) = lock(&self.state).observers.get_mut(observer) {
            entry.targets.remove(&target);
        }
    }

    fn disconnect(&self, observer: ObserverId) {
        lock(&self.state).observers.remove(observer);
    }
}
