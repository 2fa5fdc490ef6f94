//! Folio Theme System
//!
//! Resolves, persists, and reacts to changes of the site-wide theme.
//!
//! # Overview
//!
//! The active [`ThemeId`] comes from three inputs of decreasing precedence:
//!
//! 1. An explicit selection via [`ThemeStore::set_theme`]
//! 2. A preference persisted in a [`PreferenceSlot`] under `"portfolio-theme"`
//! 3. The system color scheme (`prefers-dark`), defaulting to light
//!
//! Every visual consumer is a pure function of the theme: it reads
//! [`ThemePalette::for_theme`] instead of branching on the id itself.
//!
//! # Quick Start
//!
//! ```rust
//! use folio_theme::{MemorySlot, StaticScheme, ThemeId, ThemeStore};
//! use std::sync::Arc;
//!
//! let slot = Arc::new(MemorySlot::new());
//! let store = ThemeStore::initialize(slot.clone(), &StaticScheme::new(true));
//! assert_eq!(store.theme(), ThemeId::Dark);
//!
//! store.set_theme(ThemeId::Emerald);
//!
//! // A fresh store over the same slot picks the saved preference up
//! let reloaded = ThemeStore::initialize(slot, &StaticScheme::new(true));
//! assert_eq!(reloaded.theme(), ThemeId::Emerald);
//! ```
//!
//! # Failure semantics
//!
//! Storage never fails the caller. Unreadable or invalid preferences count as
//! absent; failed writes are logged and the in-memory theme still changes.

pub mod palette;
pub mod storage;
pub mod store;
pub mod system;
pub mod theme;

#[cfg(feature = "watcher")]
pub mod watcher;

pub use palette::{ColorToken, ColorTokens, ThemeIcon, ThemePalette};
pub use storage::{
    default_slot, FileSlot, MemorySlot, PreferenceSlot, SharedSlot, StorageError, UnavailableSlot,
};
pub use store::{SubscriptionId, ThemeListener, ThemeStore, THEME_STORAGE_KEY};
pub use system::{detect_system_color_scheme, EnvScheme, StaticScheme, SystemSchemeSource};
pub use theme::{ColorScheme, ThemeId, UnknownTheme};

#[cfg(feature = "watcher")]
pub use watcher::{SystemSchemeWatcher, WatcherConfig};
