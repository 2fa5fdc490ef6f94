//! Theme store
//!
//! Single source of truth for the active [`ThemeId`]. The store is an
//! explicit value handed to every consumer (usually behind an `Arc`), not a
//! global; consumers either read [`ThemeStore::theme`] when they render or
//! [`subscribe`](ThemeStore::subscribe) to be told about changes.

use crate::palette::ThemePalette;
use crate::storage::{PreferenceSlot, SharedSlot};
use crate::system::SystemSchemeSource;
use crate::theme::{ColorScheme, ThemeId};
use folio_core::sync::{lock, read, write};
use slotmap::{new_key_type, SlotMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

/// Persistence key of the theme preference
pub const THEME_STORAGE_KEY: &str = "portfolio-theme";

/// Theme change listener
pub type ThemeListener = Arc<dyn Fn(ThemeId) + Send + Sync>;

new_key_type! {
    /// Handle returned by [`ThemeStore::subscribe`]
    pub struct SubscriptionId;
}

/// Active theme with persisted preference and system-scheme fallback
pub struct ThemeStore {
    slot: SharedSlot,
    key: String,
    theme: RwLock<ThemeId>,
    /// Set once the user picks a theme in this session
    explicit: AtomicBool,
    listeners: Mutex<SlotMap<SubscriptionId, ThemeListener>>,
}

impl ThemeStore {
    /// Resolve the startup theme and build a store under the default key
    pub fn initialize(slot: SharedSlot, system: &dyn SystemSchemeSource) -> Self {
        Self::initialize_with_key(slot, THEME_STORAGE_KEY, system)
    }

    /// Like [`ThemeStore::initialize`] with a custom persistence key
    pub fn initialize_with_key(
        slot: SharedSlot,
        key: impl Into<String>,
        system: &dyn SystemSchemeSource,
    ) -> Self {
        let key = key.into();
        let theme = Self::resolve_initial(slot.as_ref(), &key, system.prefers_dark());
        tracing::debug!("ThemeStore::initialize - starting with {}", theme);

        Self {
            slot,
            key,
            theme: RwLock::new(theme),
            explicit: AtomicBool::new(false),
            listeners: Mutex::new(SlotMap::with_key()),
        }
    }

    /// Startup precedence: saved preference, then system scheme, then light
    pub fn resolve_initial(slot: &dyn PreferenceSlot, key: &str, prefers_dark: bool) -> ThemeId {
        match read_preference(slot, key) {
            Some(saved) => saved,
            None => ThemeId::for_scheme(ColorScheme::from_prefers_dark(prefers_dark)),
        }
    }

    /// Current theme
    pub fn theme(&self) -> ThemeId {
        *read(&self.theme)
    }

    /// Palette of the current theme
    pub fn palette(&self) -> ThemePalette {
        ThemePalette::for_theme(self.theme())
    }

    /// Persistence key in use
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Saved preference, if one is readable and valid
    pub fn stored_preference(&self) -> Option<ThemeId> {
        read_preference(self.slot.as_ref(), &self.key)
    }

    /// Select a theme and persist it, even if it is already active.
    ///
    /// A failed write is logged; the in-memory theme changes regardless.
    pub fn set_theme(&self, theme: ThemeId) {
        self.explicit.store(true, Ordering::SeqCst);
        self.apply(theme);

        if let Err(err) = self.slot.write(&self.key, theme.id()) {
            tracing::warn!(
                "ThemeStore::set_theme - could not persist '{}' under '{}': {}",
                theme,
                self.key,
                err
            );
        }
    }

    /// React to a change of the system "prefers dark" signal.
    ///
    /// Ignored once the user has chosen a theme, either in this session or
    /// in a previous one.
    pub fn on_system_scheme_change(&self, is_dark: bool) {
        if self.explicit.load(Ordering::SeqCst) || self.stored_preference().is_some() {
            tracing::debug!(
                "ThemeStore::on_system_scheme_change - ignoring (dark={}), user preference wins",
                is_dark
            );
            return;
        }
        self.apply(ThemeId::for_scheme(ColorScheme::from_prefers_dark(is_dark)));
    }

    /// Register a listener called after every change of the active theme
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(ThemeId) + Send + Sync + 'static,
    {
        lock(&self.listeners).insert(Arc::new(listener))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        lock(&self.listeners).remove(id).is_some()
    }

    fn apply(&self, theme: ThemeId) {
        let previous = {
            let mut current = write(&self.theme);
            std::mem::replace(&mut *current, theme)
        };
        if previous == theme {
            return;
        }

        tracing::debug!("ThemeStore - switching from {} to {}", previous, theme);

        // Listeners may call back into the store
        let listeners: Vec<ThemeListener> = lock(&self.listeners).values().cloned().collect();
        for listener in listeners {
            listener(theme);
        }
    }
}

fn read_preference(slot: &dyn PreferenceSlot, key: &str) -> Option<ThemeId> {
    match slot.read(key) {
        Ok(Some(raw)) => {
            let parsed = ThemeId::from_id(&raw);
            if parsed.is_none() {
                tracing::debug!("ignoring unknown saved theme '{}'", raw);
            }
            parsed
        }
        Ok(None) => None,
        Err(err) => {
            tracing::warn!("theme preference unreadable, treating as unset: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemorySlot, UnavailableSlot};
    use crate::system::StaticScheme;
    use std::sync::atomic::AtomicUsize;

    fn memory() -> (MemorySlot, SharedSlot) {
        let slot = MemorySlot::new();
        let shared: SharedSlot = Arc::new(slot.clone());
        (slot, shared)
    }

    #[test]
    fn test_defaults_to_light() {
        let (_, slot) = memory();
        let store = ThemeStore::initialize(slot, &StaticScheme::new(false));
        assert_eq!(store.theme(), ThemeId::Light);
    }

    #[test]
    fn test_set_theme_persists_under_key() {
        let (raw, slot) = memory();
        let store = ThemeStore::initialize(slot, &StaticScheme::new(false));
        store.set_theme(ThemeId::Purple);

        assert_eq!(store.theme(), ThemeId::Purple);
        assert_eq!(
            raw.read(THEME_STORAGE_KEY).unwrap().as_deref(),
            Some("purple")
        );
    }

    #[test]
    fn test_set_same_theme_rewrites_slot() {
        let (raw, slot) = memory();
        let store = ThemeStore::initialize(slot, &StaticScheme::new(false));
        store.set_theme(ThemeId::Light);
        assert_eq!(raw.read(THEME_STORAGE_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_system_change_without_preference_follows_system() {
        let (_, slot) = memory();
        let store = ThemeStore::initialize(slot, &StaticScheme::new(false));

        store.on_system_scheme_change(true);
        assert_eq!(store.theme(), ThemeId::Dark);
        store.on_system_scheme_change(false);
        assert_eq!(store.theme(), ThemeId::Light);
    }

    #[test]
    fn test_system_change_ignored_with_saved_preference() {
        let slot: SharedSlot = Arc::new(MemorySlot::with_value(THEME_STORAGE_KEY, "emerald"));
        let store = ThemeStore::initialize(slot, &StaticScheme::new(true));
        assert_eq!(store.theme(), ThemeId::Emerald);

        store.on_system_scheme_change(false);
        assert_eq!(store.theme(), ThemeId::Emerald);
    }

    #[test]
    fn test_write_failure_still_updates_memory() {
        let store = ThemeStore::initialize(Arc::new(UnavailableSlot), &StaticScheme::new(true));
        assert_eq!(store.theme(), ThemeId::Dark);

        store.set_theme(ThemeId::Purple);
        assert_eq!(store.theme(), ThemeId::Purple);

        // Explicit choice in this session still beats the system signal
        store.on_system_scheme_change(false);
        assert_eq!(store.theme(), ThemeId::Purple);
    }

    #[test]
    fn test_unreadable_preference_follows_system() {
        let store = ThemeStore::initialize(Arc::new(UnavailableSlot), &StaticScheme::new(false));
        assert_eq!(store.theme(), ThemeId::Light);
        assert_eq!(store.stored_preference(), None);

        store.on_system_scheme_change(true);
        assert_eq!(store.theme(), ThemeId::Dark);
    }

    #[test]
    fn test_listeners_notified_on_change_only() {
        let (_, slot) = memory();
        let store = ThemeStore::initialize(slot, &StaticScheme::new(false));
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let id = store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.set_theme(ThemeId::Light);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        store.set_theme(ThemeId::Dark);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert!(store.unsubscribe(id));
        store.set_theme(ThemeId::Emerald);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
