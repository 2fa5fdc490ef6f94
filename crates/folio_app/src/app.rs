//! Portfolio composition
//!
//! [`Portfolio`] wires the theme store, scroll reveals, hero typewriter,
//! header and projects filter to the capabilities a host provides in
//! [`PortfolioHost`]. Rendering code reads [`Portfolio::snapshot`] and
//! styles itself from [`Portfolio::palette`].

use crate::config::FolioConfig;
use crate::contact::{ContactError, ContactLink, ContactMessage};
use crate::content::{Profile, SocialLink, PROFILE, SOCIAL_LINKS};
use crate::error::Result;
use crate::header::{HeaderState, ThemeOption, ThemeSwitcher};
use crate::hero::{CursorStyle, Hero};
use crate::projects::ProjectFilter;
use crate::sections::Section;
use folio_animation::{IntersectionHost, NoopIntersectionHost, RevealTrigger, TextSink, Visibility};
use folio_core::timer::SharedScheduler;
use folio_theme::{
    default_slot, EnvScheme, SharedSlot, SystemSchemeSource, SystemSchemeWatcher, ThemeIcon,
    ThemeId, ThemePalette, ThemeStore, WatcherConfig,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Capabilities supplied by the host environment
pub struct PortfolioHost {
    /// Where the theme preference is persisted
    pub slot: SharedSlot,
    /// System "prefers dark" signal
    pub system: Arc<dyn SystemSchemeSource>,
    pub scheduler: SharedScheduler,
    /// Viewport observation for scroll reveals
    pub intersections: Arc<dyn IntersectionHost>,
    /// Receives every headline string as it is typed
    pub headline_sink: Option<TextSink>,
}

impl PortfolioHost {
    /// Desktop host: preferences file in the user config dir, scheme from
    /// the environment, no viewport observation
    pub fn desktop(scheduler: SharedScheduler) -> Self {
        Self {
            slot: default_slot(),
            system: Arc::new(EnvScheme),
            scheduler,
            intersections: Arc::new(NoopIntersectionHost),
            headline_sink: None,
        }
    }
}

/// Render-relevant state at one instant
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub theme: ThemeId,
    pub theme_icon: ThemeIcon,
    pub theme_menu_open: bool,
    pub header_scrolled: bool,
    pub menu_open: bool,
    pub headline: String,
    pub cursor: CursorStyle,
    pub hero_text_visible: bool,
    pub revealed: Vec<Section>,
    pub project_tag: String,
    pub visible_projects: Vec<u32>,
}

impl PortfolioSnapshot {
    pub fn is_revealed(&self, section: Section) -> bool {
        self.revealed.contains(&section)
    }
}

/// The mounted page
pub struct Portfolio {
    config: FolioConfig,
    store: Arc<ThemeStore>,
    reveal: RevealTrigger,
    hero: Hero,
    header: HeaderState,
    switcher: ThemeSwitcher,
    projects: ProjectFilter,
    contact: ContactLink,
    watcher: Option<SystemSchemeWatcher>,
}

impl Portfolio {
    pub fn new(config: FolioConfig, host: PortfolioHost) -> Result<Self> {
        config.validate()?;

        let store = Arc::new(ThemeStore::initialize_with_key(
            host.slot,
            config.theme.storage_key.clone(),
            host.system.as_ref(),
        ));

        let reveal = RevealTrigger::new(host.intersections, config.reveal.threshold)?;
        for element in Section::all().iter().filter_map(|s| s.reveal_element()) {
            reveal.observe(element);
        }

        let hero = Hero::mount(&config, host.scheduler.clone(), host.headline_sink)?;
        let contact = ContactLink::new(&config.contact.whatsapp_number)?;

        let watcher = config.theme.watch_system.then(|| {
            SystemSchemeWatcher::start(
                store.clone(),
                host.system.clone(),
                host.scheduler.clone(),
                WatcherConfig {
                    interval: config.theme.watch_interval(),
                },
            )
        });

        tracing::debug!(
            "Portfolio::new - mounted with theme {} ({} reveal targets)",
            store.theme(),
            reveal.target_count()
        );

        Ok(Self {
            header: HeaderState::new(config.header.scroll_threshold),
            config,
            store,
            reveal,
            hero,
            switcher: ThemeSwitcher::new(),
            projects: ProjectFilter::default(),
            contact,
            watcher,
        })
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<ThemeStore> {
        &self.store
    }

    pub fn theme(&self) -> ThemeId {
        self.store.theme()
    }

    pub fn palette(&self) -> ThemePalette {
        self.store.palette()
    }

    /// Pick a theme from the switcher
    pub fn set_theme(&mut self, theme: ThemeId) {
        self.switcher.select(&self.store, theme);
    }

    pub fn toggle_theme_menu(&mut self) {
        self.switcher.toggle();
    }

    pub fn theme_options(&self) -> Vec<ThemeOption> {
        self.switcher.options(&self.store)
    }

    /// Host push of the system "prefers dark" signal
    pub fn on_system_scheme_change(&self, prefers_dark: bool) {
        self.store.on_system_scheme_change(prefers_dark);
    }

    /// Page scroll offset changed
    pub fn on_scroll(&mut self, y: f32) {
        if self.header.on_scroll(y) {
            tracing::trace!("Portfolio - header scrolled={}", self.header.is_scrolled());
        }
    }

    pub fn toggle_menu(&mut self) {
        self.header.toggle_menu();
    }

    /// Follow a nav link; the host scrolls to the returned section
    pub fn navigate(&mut self, section: Section) -> Section {
        self.header.select_nav(section)
    }

    pub fn header(&self) -> &HeaderState {
        &self.header
    }

    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    pub fn headline(&self) -> String {
        self.hero.headline()
    }

    /// Restart the headline from the first phrase
    pub fn restart_headline(&self) {
        self.hero.restart_typewriter();
    }

    pub fn profile(&self) -> &'static Profile {
        &PROFILE
    }

    pub fn social_links(&self) -> &'static [SocialLink] {
        SOCIAL_LINKS
    }

    pub fn reveal(&self) -> &RevealTrigger {
        &self.reveal
    }

    /// The hero counts as revealed once its photo is shown
    pub fn is_revealed(&self, section: Section) -> bool {
        match section.reveal_element() {
            Some(element) => self.reveal.is_visible(element),
            None => true,
        }
    }

    pub fn revealed_sections(&self) -> Vec<Section> {
        Section::all()
            .iter()
            .copied()
            .filter(|s| self.is_revealed(*s))
            .collect()
    }

    pub fn projects(&self) -> &ProjectFilter {
        &self.projects
    }

    pub fn select_project_tag(&mut self, tag: &str) -> &'static str {
        self.projects.select(tag)
    }

    /// Deep link for a submitted contact form
    pub fn contact_url(&self, message: &ContactMessage) -> std::result::Result<String, ContactError> {
        self.contact.url_for(message)
    }

    pub fn snapshot(&self) -> PortfolioSnapshot {
        PortfolioSnapshot {
            theme: self.store.theme(),
            theme_icon: self.switcher.icon(&self.store),
            theme_menu_open: self.switcher.is_open(),
            header_scrolled: self.header.is_scrolled(),
            menu_open: self.header.is_menu_open(),
            headline: self.hero.headline(),
            cursor: self.hero.cursor(),
            hero_text_visible: self.hero.text_visibility() == Visibility::Visible,
            revealed: self.revealed_sections(),
            project_tag: self.projects.selected().to_string(),
            visible_projects: self.projects.visible().iter().map(|p| p.id).collect(),
        }
    }

    /// Release timers and observers; state stays readable
    pub fn teardown(&mut self) {
        self.hero.unmount();
        self.reveal.dispose();
        if let Some(watcher) = self.watcher.take() {
            watcher.stop();
        }
        tracing::debug!("Portfolio::teardown - released timers and observers");
    }
}
