//! Per-theme palettes
//!
//! Each section of the page picks its styling from a [`ThemePalette`]
//! instead of branching on the theme id.

use crate::theme::ThemeId;
use folio_core::Color;
use serde::{Deserialize, Serialize};
use rustc_hash::FxHashMap;

/// Semantic color token keys for dynamic access
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ColorToken {
    /// Section background
    Background,
    /// Fixed header background
    Header,
    /// Cards and panels
    Surface,
    /// Body text
    Text,
    /// Primary buttons, dividers
    Accent,
    AccentHover,
    /// Highlighted inline text (name, typewriter headline, links)
    AccentText,
    /// Secondary buttons and chips
    Muted,
    MutedHover,
    Border,
    InputBg,
    /// Circle behind contact icons
    IconBg,
}

impl ColorToken {
    pub fn all() -> &'static [ColorToken] {
        const TOKENS: [ColorToken; 12] = [
            ColorToken::Background,
            ColorToken::Header,
            ColorToken::Surface,
            ColorToken::Text,
            ColorToken::Accent,
            ColorToken::AccentHover,
            ColorToken::AccentText,
            ColorToken::Muted,
            ColorToken::MutedHover,
            ColorToken::Border,
            ColorToken::InputBg,
            ColorToken::IconBg,
        ];
        &TOKENS
    }

    /// CSS variable name, without the `--` prefix
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Header => "header",
            Self::Surface => "surface",
            Self::Text => "text",
            Self::Accent => "accent",
            Self::AccentHover => "accent-hover",
            Self::AccentText => "accent-text",
            Self::Muted => "muted",
            Self::MutedHover => "muted-hover",
            Self::Border => "border",
            Self::InputBg => "input-bg",
            Self::IconBg => "icon-bg",
        }
    }
}

/// Color values for one theme
#[derive(Clone, Debug, PartialEq)]
pub struct ColorTokens {
    pub background: Color,
    pub header: Color,
    pub surface: Color,
    pub text: Color,
    pub accent: Color,
    pub accent_hover: Color,
    pub accent_text: Color,
    pub muted: Color,
    pub muted_hover: Color,
    pub border: Color,
    pub input_bg: Color,
    pub icon_bg: Color,
}

impl ColorTokens {
    pub fn get(&self, token: ColorToken) -> Color {
        match token {
            ColorToken::Background => self.background,
            ColorToken::Header => self.header,
            ColorToken::Surface => self.surface,
            ColorToken::Text => self.text,
            ColorToken::Accent => self.accent,
            ColorToken::AccentHover => self.accent_hover,
            ColorToken::AccentText => self.accent_text,
            ColorToken::Muted => self.muted,
            ColorToken::MutedHover => self.muted_hover,
            ColorToken::Border => self.border,
            ColorToken::InputBg => self.input_bg,
            ColorToken::IconBg => self.icon_bg,
        }
    }
}

/// Icon shown on the theme switcher button
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeIcon {
    Sun,
    Moon,
    Palette,
}

/// Everything a section needs to style itself for one theme
#[derive(Clone, Debug, PartialEq)]
pub struct ThemePalette {
    pub theme: ThemeId,
    pub colors: ColorTokens,
    pub icon: ThemeIcon,
}

impl ThemePalette {
    pub fn for_theme(theme: ThemeId) -> Self {
        let (colors, icon) = match theme {
            ThemeId::Light => (light(), ThemeIcon::Sun),
            ThemeId::Dark => (dark(), ThemeIcon::Moon),
            ThemeId::Purple => (purple(), ThemeIcon::Palette),
            ThemeId::Emerald => (emerald(), ThemeIcon::Palette),
        };
        Self {
            theme,
            colors,
            icon,
        }
    }

    pub fn color(&self, token: ColorToken) -> Color {
        self.colors.get(token)
    }

    /// Typing cursor color: dark ink on the light theme, white elsewhere
    pub fn cursor(&self) -> Color {
        if self.theme.scheme().is_dark() {
            Color::WHITE
        } else {
            self.colors.text
        }
    }

    /// CSS variables for the palette, keyed by [`ColorToken::css_name`]
    pub fn to_css_variable_map(&self) -> FxHashMap<String, String> {
        ColorToken::all()
            .iter()
            .map(|token| (token.css_name().to_string(), self.color(*token).to_css()))
            .collect()
    }
}

fn light() -> ColorTokens {
    ColorTokens {
        background: Color::from_hex(0xF9FAFB),
        header: Color::WHITE,
        surface: Color::WHITE,
        text: Color::from_hex(0x1F2937),
        accent: Color::from_hex(0x2563EB),
        accent_hover: Color::from_hex(0x1D4ED8),
        accent_text: Color::from_hex(0x2563EB),
        muted: Color::from_hex(0xE5E7EB),
        muted_hover: Color::from_hex(0xD1D5DB),
        border: Color::from_hex(0xD1D5DB),
        input_bg: Color::from_hex(0xF3F4F6),
        icon_bg: Color::from_hex(0xDBEAFE),
    }
}

fn dark() -> ColorTokens {
    ColorTokens {
        background: Color::from_hex(0x111827),
        header: Color::from_hex(0x111827),
        surface: Color::from_hex(0x1F2937),
        text: Color::WHITE,
        accent: Color::from_hex(0x3B82F6),
        accent_hover: Color::from_hex(0x60A5FA),
        accent_text: Color::from_hex(0x60A5FA),
        muted: Color::from_hex(0x374151),
        muted_hover: Color::from_hex(0x4B5563),
        border: Color::from_hex(0x4B5563),
        input_bg: Color::from_hex(0x374151),
        icon_bg: Color::from_hex(0x1E3A8A),
    }
}

fn purple() -> ColorTokens {
    ColorTokens {
        background: Color::from_hex(0x3B0764),
        header: Color::from_hex(0x581C87),
        surface: Color::from_hex(0x581C87),
        text: Color::WHITE,
        accent: Color::from_hex(0xA855F7),
        accent_hover: Color::from_hex(0xC084FC),
        accent_text: Color::from_hex(0xC084FC),
        muted: Color::from_hex(0x6B21A8),
        muted_hover: Color::from_hex(0x7E22CE),
        border: Color::from_hex(0x7E22CE),
        input_bg: Color::from_hex(0x6B21A8),
        icon_bg: Color::from_hex(0x6B21A8),
    }
}

fn emerald() -> ColorTokens {
    ColorTokens {
        background: Color::from_hex(0x022C22),
        header: Color::from_hex(0x064E3B),
        surface: Color::from_hex(0x064E3B),
        text: Color::WHITE,
        accent: Color::from_hex(0x10B981),
        accent_hover: Color::from_hex(0x34D399),
        accent_text: Color::from_hex(0x34D399),
        muted: Color::from_hex(0x065F46),
        muted_hover: Color::from_hex(0x047857),
        border: Color::from_hex(0x047857),
        input_bg: Color::from_hex(0x065F46),
        icon_bg: Color::from_hex(0x065F46),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icons() {
        assert_eq!(ThemePalette::for_theme(ThemeId::Light).icon, ThemeIcon::Sun);
        assert_eq!(ThemePalette::for_theme(ThemeId::Dark).icon, ThemeIcon::Moon);
        assert_eq!(
            ThemePalette::for_theme(ThemeId::Emerald).icon,
            ThemeIcon::Palette
        );
    }

    #[test]
    fn test_cursor_contrast() {
        let light = ThemePalette::for_theme(ThemeId::Light);
        assert_eq!(light.cursor(), Color::from_hex(0x1F2937));
        assert_eq!(ThemePalette::for_theme(ThemeId::Purple).cursor(), Color::WHITE);
    }

    #[test]
    fn test_css_variables_cover_every_token() {
        let vars = ThemePalette::for_theme(ThemeId::Dark).to_css_variable_map();
        assert_eq!(vars.len(), ColorToken::all().len());
        assert_eq!(vars["background"], "#111827");
        assert_eq!(vars["accent-text"], "#60a5fa");
    }
}
