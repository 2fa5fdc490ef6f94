//! Folio configuration file handling
//!
//! Every section is optional; missing keys fall back to the values the site
//! ships with.
//!
//! ```toml
//! [theme]
//! storage_key = "portfolio-theme"
//! watch_system = false
//! watch_interval_ms = 1000
//!
//! [typewriter]
//! phrases = ["Frontend Developer", "UI/UX Designer"]
//! type_delay_ms = 150
//! delete_delay_ms = 50
//! pause_ms = 2000
//!
//! [reveal]
//! threshold = 0.1
//!
//! [hero]
//! text_delay_ms = 300
//!
//! [header]
//! scroll_threshold = 10.0
//!
//! [contact]
//! whatsapp_number = "6281268088246"
//! ```

use folio_animation::{TypewriterTimings, DEFAULT_REVEAL_THRESHOLD};
use folio_theme::THEME_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level Folio configuration (folio.toml)
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub typewriter: TypewriterConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub hero: HeroConfig,
    #[serde(default)]
    pub header: HeaderConfig,
    #[serde(default)]
    pub contact: ContactConfig,
}

/// Theme persistence and system scheme polling
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ThemeConfig {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Poll the system scheme instead of waiting for the host to push changes
    #[serde(default)]
    pub watch_system: bool,
    #[serde(default = "default_watch_interval")]
    pub watch_interval_ms: u64,
}

fn default_storage_key() -> String {
    THEME_STORAGE_KEY.to_string()
}

fn default_watch_interval() -> u64 {
    1000
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            watch_system: false,
            watch_interval_ms: default_watch_interval(),
        }
    }
}

impl ThemeConfig {
    pub fn watch_interval(&self) -> Duration {
        Duration::from_millis(self.watch_interval_ms)
    }
}

/// Hero headline cycler
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TypewriterConfig {
    #[serde(default = "default_phrases")]
    pub phrases: Vec<String>,
    #[serde(default = "default_type_delay")]
    pub type_delay_ms: u64,
    #[serde(default = "default_delete_delay")]
    pub delete_delay_ms: u64,
    #[serde(default = "default_pause")]
    pub pause_ms: u64,
}

fn default_phrases() -> Vec<String> {
    vec!["Frontend Developer".to_string(), "UI/UX Designer".to_string()]
}

fn default_type_delay() -> u64 {
    150
}

fn default_delete_delay() -> u64 {
    50
}

fn default_pause() -> u64 {
    2000
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            phrases: default_phrases(),
            type_delay_ms: default_type_delay(),
            delete_delay_ms: default_delete_delay(),
            pause_ms: default_pause(),
        }
    }
}

impl TypewriterConfig {
    pub fn timings(&self) -> TypewriterTimings {
        TypewriterTimings {
            type_delay: Duration::from_millis(self.type_delay_ms),
            delete_delay: Duration::from_millis(self.delete_delay_ms),
            pause: Duration::from_millis(self.pause_ms),
        }
    }
}

/// Scroll reveal
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RevealConfig {
    #[serde(default = "default_reveal_threshold")]
    pub threshold: f32,
}

fn default_reveal_threshold() -> f32 {
    DEFAULT_REVEAL_THRESHOLD
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: default_reveal_threshold(),
        }
    }
}

/// Hero intro animation
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct HeroConfig {
    /// Delay between the photo and the text block fading in
    #[serde(default = "default_text_delay")]
    pub text_delay_ms: u64,
}

fn default_text_delay() -> u64 {
    300
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            text_delay_ms: default_text_delay(),
        }
    }
}

impl HeroConfig {
    pub fn text_delay(&self) -> Duration {
        Duration::from_millis(self.text_delay_ms)
    }
}

/// Sticky header
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct HeaderConfig {
    /// Scroll offset past which the header switches to its solid style
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: f32,
}

fn default_scroll_threshold() -> f32 {
    10.0
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: default_scroll_threshold(),
        }
    }
}

/// Contact deep link
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ContactConfig {
    #[serde(default = "default_whatsapp_number")]
    pub whatsapp_number: String,
}

fn default_whatsapp_number() -> String {
    "6281268088246".to_string()
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            whatsapp_number: default_whatsapp_number(),
        }
    }
}

impl FolioConfig {
    /// Parse and validate TOML text
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: FolioConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file, or a `folio.toml` inside a directory
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config_path = if path.is_dir() {
            path.join("folio.toml")
        } else {
            path.to_path_buf()
        };

        let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
            path: config_path.clone(),
            source,
        })?;
        tracing::debug!("FolioConfig::load - read {}", config_path.display());
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.theme.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("theme.storage_key is empty".into()));
        }
        if self.theme.watch_system && self.theme.watch_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "theme.watch_interval_ms must be > 0".into(),
            ));
        }

        let typewriter = &self.typewriter;
        if typewriter.phrases.is_empty() {
            return Err(ConfigError::Invalid("typewriter.phrases is empty".into()));
        }
        if let Some(index) = typewriter.phrases.iter().position(|p| p.is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "typewriter.phrases[{index}] is empty"
            )));
        }
        for (name, value) in [
            ("type_delay_ms", typewriter.type_delay_ms),
            ("delete_delay_ms", typewriter.delete_delay_ms),
            ("pause_ms", typewriter.pause_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!(
                    "typewriter.{name} must be > 0"
                )));
            }
        }

        let threshold = self.reveal.threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "reveal.threshold must be in (0, 1], got {threshold}"
            )));
        }

        if !self.header.scroll_threshold.is_finite() || self.header.scroll_threshold < 0.0 {
            return Err(ConfigError::Invalid(
                "header.scroll_threshold must be a non-negative number".into(),
            ));
        }

        if !self
            .contact
            .whatsapp_number
            .chars()
            .any(|c| c.is_ascii_digit())
        {
            return Err(ConfigError::Invalid(
                "contact.whatsapp_number has no digits".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = FolioConfig::from_toml_str("").unwrap();
        assert_eq!(config, FolioConfig::default());
        assert_eq!(config.typewriter.timings(), TypewriterTimings::default());
        assert_eq!(config.theme.storage_key, "portfolio-theme");
        assert_eq!(config.hero.text_delay(), Duration::from_millis(300));
    }

    #[test]
    fn test_partial_sections() {
        let config = FolioConfig::from_toml_str(
            r#"
            [typewriter]
            phrases = ["Rustacean"]
            pause_ms = 500

            [reveal]
            threshold = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(config.typewriter.phrases, vec!["Rustacean".to_string()]);
        assert_eq!(config.typewriter.pause_ms, 500);
        assert_eq!(config.typewriter.type_delay_ms, 150);
        assert_eq!(config.reveal.threshold, 0.25);
    }

    #[test]
    fn test_rejects_invalid_values() {
        for input in [
            "[typewriter]\nphrases = []",
            "[typewriter]\nphrases = [\"\"]",
            "[typewriter]\ntype_delay_ms = 0",
            "[reveal]\nthreshold = 0.0",
            "[reveal]\nthreshold = 1.5",
            "[contact]\nwhatsapp_number = \"+\"",
            "[theme]\nstorage_key = \" \"",
            "[theme]\nwatch_system = true\nwatch_interval_ms = 0",
        ] {
            assert!(
                matches!(
                    FolioConfig::from_toml_str(input),
                    Err(ConfigError::Invalid(_))
                ),
                "accepted: {input}"
            );
        }
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            FolioConfig::from_toml_str("[reveal\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = FolioConfig::default();
        config.header.scroll_threshold = 24.0;
        let text = config.to_toml().unwrap();
        assert_eq!(FolioConfig::from_toml_str(&text).unwrap(), config);
    }
}
