//! Sticky header, mobile menu and theme switcher

use crate::sections::Section;
use folio_theme::{ThemeIcon, ThemeId, ThemePalette, ThemeStore};
use serde::Serialize;

pub const DEFAULT_SCROLL_THRESHOLD: f32 = 10.0;

/// Header chrome state
#[derive(Clone, Debug)]
pub struct HeaderState {
    scrolled: bool,
    menu_open: bool,
    scroll_threshold: f32,
}

impl Default for HeaderState {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_THRESHOLD)
    }
}

impl HeaderState {
    pub fn new(scroll_threshold: f32) -> Self {
        Self {
            scrolled: false,
            menu_open: false,
            scroll_threshold,
        }
    }

    /// Track the page scroll offset. Returns true if the style changed.
    pub fn on_scroll(&mut self, y: f32) -> bool {
        let scrolled = y > self.scroll_threshold;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }

    /// Solid background once the page has scrolled
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Follow a nav link; the mobile menu closes behind it
    pub fn select_nav(&mut self, section: Section) -> Section {
        self.menu_open = false;
        section
    }

    pub fn nav_items(&self) -> &'static [Section] {
        Section::all()
    }
}

/// One row of the theme dropdown
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ThemeOption {
    pub id: ThemeId,
    pub label: &'static str,
    pub icon: ThemeIcon,
    pub is_active: bool,
}

/// Theme dropdown
#[derive(Clone, Debug, Default)]
pub struct ThemeSwitcher {
    open: bool,
}

impl ThemeSwitcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Apply a theme and close the dropdown
    pub fn select(&mut self, store: &ThemeStore, theme: ThemeId) {
        store.set_theme(theme);
        self.open = false;
    }

    /// Icon on the switcher button
    pub fn icon(&self, store: &ThemeStore) -> ThemeIcon {
        ThemePalette::for_theme(store.theme()).icon
    }

    pub fn options(&self, store: &ThemeStore) -> Vec<ThemeOption> {
        let active = store.theme();
        ThemeId::all()
            .iter()
            .map(|id| ThemeOption {
                id: *id,
                label: id.display_name(),
                icon: ThemePalette::for_theme(*id).icon,
                is_active: *id == active,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_theme::{MemorySlot, StaticScheme};
    use std::sync::Arc;

    #[test]
    fn test_scrolled_strictly_above_threshold() {
        let mut header = HeaderState::default();
        assert!(!header.on_scroll(10.0));
        assert!(!header.is_scrolled());
        assert!(header.on_scroll(10.5));
        assert!(header.is_scrolled());
        assert!(!header.on_scroll(400.0));
        assert!(header.on_scroll(0.0));
        assert!(!header.is_scrolled());
    }

    #[test]
    fn test_nav_closes_menu() {
        let mut header = HeaderState::default();
        header.toggle_menu();
        assert!(header.is_menu_open());
        assert_eq!(header.select_nav(Section::Projects), Section::Projects);
        assert!(!header.is_menu_open());
        assert_eq!(header.nav_items().len(), 5);
    }

    #[test]
    fn test_switcher_select_closes_and_marks_active() {
        let store = ThemeStore::initialize(Arc::new(MemorySlot::new()), &StaticScheme::new(false));
        let mut switcher = ThemeSwitcher::new();
        assert_eq!(switcher.icon(&store), ThemeIcon::Sun);

        switcher.toggle();
        assert!(switcher.is_open());
        switcher.select(&store, ThemeId::Purple);
        assert!(!switcher.is_open());
        assert_eq!(switcher.icon(&store), ThemeIcon::Palette);

        let active: Vec<ThemeId> = switcher
            .options(&store)
            .into_iter()
            .filter(|o| o.is_active)
            .map(|o| o.id)
            .collect();
        assert_eq!(active, vec![ThemeId::Purple]);
    }
}
