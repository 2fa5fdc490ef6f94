//! System color scheme signal

use crate::theme::ColorScheme;
use std::sync::atomic::{AtomicBool, Ordering};

/// Environment variable that forces the detected scheme (`dark` or `light`)
pub const SCHEME_OVERRIDE_VAR: &str = "FOLIO_COLOR_SCHEME";

/// Read-only "prefers dark" signal supplied by the host
pub trait SystemSchemeSource: Send + Sync {
    fn prefers_dark(&self) -> bool;

    fn scheme(&self) -> ColorScheme {
        ColorScheme::from_prefers_dark(self.prefers_dark())
    }
}

/// A signal the host sets explicitly, e.g. from a media-query listener
#[derive(Debug, Default)]
pub struct StaticScheme {
    dark: AtomicBool,
}

impl StaticScheme {
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            dark: AtomicBool::new(prefers_dark),
        }
    }

    pub fn set(&self, prefers_dark: bool) {
        self.dark.store(prefers_dark, Ordering::SeqCst);
    }
}

impl SystemSchemeSource for StaticScheme {
    fn prefers_dark(&self) -> bool {
        self.dark.load(Ordering::SeqCst)
    }
}

/// Signal read from the process environment on every poll
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvScheme;

impl SystemSchemeSource for EnvScheme {
    fn prefers_dark(&self) -> bool {
        detect_system_color_scheme().is_dark()
    }
}

/// Detect the desktop color scheme from the environment.
///
/// `FOLIO_COLOR_SCHEME` wins when set to `dark` or `light`; otherwise a
/// `GTK_THEME` ending in `:dark` means dark. Anything else is light.
pub fn detect_system_color_scheme() -> ColorScheme {
    let forced = std::env::var(SCHEME_OVERRIDE_VAR).ok();
    let gtk_theme = std::env::var("GTK_THEME").ok();
    scheme_from_env(forced.as_deref(), gtk_theme.as_deref())
}

fn scheme_from_env(forced: Option<&str>, gtk_theme: Option<&str>) -> ColorScheme {
    match forced.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("dark") => return ColorScheme::Dark,
        Some("light") => return ColorScheme::Light,
        _ => {}
    }

    let gtk_dark = gtk_theme
        .map(|theme| theme.to_ascii_lowercase().ends_with(":dark"))
        .unwrap_or(false);
    ColorScheme::from_prefers_dark(gtk_dark)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        assert_eq!(
            scheme_from_env(Some("Dark"), Some("Adwaita")),
            ColorScheme::Dark
        );
        assert_eq!(
            scheme_from_env(Some("light"), Some("Adwaita:dark")),
            ColorScheme::Light
        );
    }

    #[test]
    fn test_gtk_theme_variant() {
        assert_eq!(scheme_from_env(None, Some("Adwaita:dark")), ColorScheme::Dark);
        assert_eq!(scheme_from_env(None, Some("Adwaita")), ColorScheme::Light);
        assert_eq!(scheme_from_env(Some("neon"), None), ColorScheme::Light);
    }

    #[test]
    fn test_static_scheme_updates() {
        let source = StaticScheme::new(false);
        assert_eq!(source.scheme(), ColorScheme::Light);
        source.set(true);
        assert!(source.prefers_dark());
    }
}
