//! Theme identifiers and color schemes

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Light or dark color scheme, as reported by the system
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Site-wide visual theme. No other values exist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    #[default]
    Light,
    Dark,
    Purple,
    Emerald,
}

/// A string that is not one of the four theme ids
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme id '{0}'")]
pub struct UnknownTheme(pub String);

impl ThemeId {
    /// Stable id used for persistence and config.
    pub fn id(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Purple => "purple",
            Self::Emerald => "emerald",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::Purple => "Purple",
            Self::Emerald => "Emerald",
        }
    }

    /// All themes in switcher order.
    pub fn all() -> &'static [ThemeId] {
        const THEMES: [ThemeId; 4] = [
            ThemeId::Light,
            ThemeId::Dark,
            ThemeId::Purple,
            ThemeId::Emerald,
        ];
        &THEMES
    }

    /// Exact, case-sensitive lookup of a stable id
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|theme| theme.id() == id)
    }

    /// Theme chosen from the system signal when nothing was saved
    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self::Light,
            ColorScheme::Dark => Self::Dark,
        }
    }

    /// Whether content sits on a light or dark background
    pub fn scheme(self) -> ColorScheme {
        match self {
            Self::Light => ColorScheme::Light,
            Self::Dark | Self::Purple | Self::Emerald => ColorScheme::Dark,
        }
    }
}

impl FromStr for ThemeId {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

impl Display for ThemeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
