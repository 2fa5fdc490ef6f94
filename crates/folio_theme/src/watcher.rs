//! System color scheme watcher
//!
//! Hosts without change notifications can poll the system signal instead.
//! The watcher re-reads a [`SystemSchemeSource`] on a fixed interval and
//! forwards every flip to [`ThemeStore::on_system_scheme_change`].

use crate::store::ThemeStore;
use crate::system::SystemSchemeSource;
use folio_core::sync::lock;
use folio_core::timer::{SharedScheduler, TimerId};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

/// Watcher configuration
#[derive(Clone, Copy, Debug)]
pub struct WatcherConfig {
    /// How often the system signal is read
    pub interval: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(1000),
        }
    }
}

struct WatchState {
    last_dark: bool,
    timer: Option<TimerId>,
    running: bool,
}

struct WatcherInner {
    store: Arc<ThemeStore>,
    source: Arc<dyn SystemSchemeSource>,
    scheduler: SharedScheduler,
    interval: Duration,
    state: Mutex<WatchState>,
}

/// Polls the system scheme until stopped or dropped
pub struct SystemSchemeWatcher {
    inner: Arc<WatcherInner>,
}

impl SystemSchemeWatcher {
    pub fn start(
        store: Arc<ThemeStore>,
        source: Arc<dyn SystemSchemeSource>,
        scheduler: SharedScheduler,
        config: WatcherConfig,
    ) -> Self {
        let last_dark = source.prefers_dark();
        let inner = Arc::new(WatcherInner {
            store,
            source,
            scheduler,
            interval: config.interval,
            state: Mutex::new(WatchState {
                last_dark,
                timer: None,
                running: true,
            }),
        });
        schedule_poll(&inner);
        Self { inner }
    }

    pub fn is_running(&self) -> bool {
        lock(&self.inner.state).running
    }

    /// Stop polling and cancel the pending poll
    pub fn stop(&self) {
        let timer = {
            let mut state = lock(&self.inner.state);
            state.running = false;
            state.timer.take()
        };
        if let Some(id) = timer {
            self.inner.scheduler.cancel(id);
        }
    }
}

impl Drop for SystemSchemeWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

fn schedule_poll(inner: &Arc<WatcherInner>) {
    let weak: Weak<WatcherInner> = Arc::downgrade(inner);
    let id = inner.scheduler.schedule(
        inner.interval,
        Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                poll(&inner);
            }
        }),
    );

    let mut state = lock(&inner.state);
    if state.running {
        state.timer = Some(id);
    } else {
        drop(state);
        inner.scheduler.cancel(id);
    }
}

fn poll(inner: &Arc<WatcherInner>) {
    let dark = inner.source.prefers_dark();
    let changed = {
        let mut state = lock(&inner.state);
        if !state.running {
            return;
        }
        state.timer = None;
        let changed = state.last_dark != dark;
        state.last_dark = dark;
        changed
    };

    if changed {
        tracing::debug!("SystemSchemeWatcher - system scheme changed (dark={})", dark);
        inner.store.on_system_scheme_change(dark);
    }
    schedule_poll(inner);
}
