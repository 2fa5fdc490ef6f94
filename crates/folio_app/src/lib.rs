//! Folio Application
//!
//! The behavioral core of a single-page developer portfolio: theme selection
//! with a persisted preference, scroll-triggered section reveals, the hero's
//! typewriter headline, header chrome, the projects filter and the contact
//! deep link.
//!
//! # Example
//!
//! ```rust
//! use folio_app::prelude::*;
//! use std::sync::Arc;
//!
//! let timers = VirtualTimers::shared();
//! let mut page = Portfolio::new(
//!     FolioConfig::default(),
//!     PortfolioHost {
//!         slot: Arc::new(MemorySlot::new()),
//!         system: Arc::new(StaticScheme::new(true)),
//!         scheduler: timers.clone(),
//!         intersections: Arc::new(NoopIntersectionHost),
//!         headline_sink: None,
//!     },
//! )
//! .unwrap();
//!
//! assert_eq!(page.theme(), ThemeId::Dark);
//! timers.advance(std::time::Duration::from_millis(300));
//! assert_eq!(page.headline(), "Fr");
//!
//! page.set_theme(ThemeId::Emerald);
//! assert_eq!(page.snapshot().theme, ThemeId::Emerald);
//! ```
//!
//! # Headless runs
//!
//! Scenario files drive a mounted page on virtual time:
//!
//! ```json
//! {
//!   "setup": { "prefers_dark": true },
//!   "steps": [
//!     { "type": "assert_theme", "theme": "dark" },
//!     { "type": "wait", "ms": 300 },
//!     { "type": "assert_headline", "value": "Fr" },
//!     { "type": "navigate", "section": "projects" },
//!     { "type": "assert_revealed", "section": "projects" }
//!   ]
//! }
//! ```

pub mod app;
pub mod config;
pub mod contact;
pub mod content;
pub mod error;
pub mod header;
pub mod headless_assert;
pub mod headless_report;
pub mod headless_runner;
pub mod headless_scenario;
pub mod hero;
pub mod projects;
pub mod sections;


pub use app::{Portfolio, PortfolioHost, PortfolioSnapshot};
pub use config::{ConfigError, FolioConfig};
pub use contact::{ContactError, ContactLink, ContactMessage};
pub use error::{FolioError, Result};
pub use headless_report::{HeadlessReport, ReportStatus};
pub use headless_runner::{
    run_loaded_scenario, run_scenario, run_scenario_with_config, HeadlessHarness,
    HeadlessRunConfig, RunOutcome,
};
pub use headless_scenario::{HeadlessScenario, ScenarioSetup, ScenarioStep};
pub use hero::{CursorStyle, Hero};
pub use sections::{PageLayout, Section};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::app::{Portfolio, PortfolioHost, PortfolioSnapshot};
    pub use crate::config::FolioConfig;
    pub use crate::contact::ContactMessage;
    pub use crate::error::{FolioError, Result};
    pub use crate::sections::Section;

    pub use folio_animation::{NoopIntersectionHost, SimulatedViewport};
    pub use folio_core::VirtualTimers;
    pub use folio_theme::{FileSlot, MemorySlot, StaticScheme, ThemeId};
}
