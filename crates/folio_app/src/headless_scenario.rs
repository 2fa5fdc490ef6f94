//! Scenario definition for headless portfolio runs.

use crate::sections::Section;
use anyhow::Result;
use folio_theme::ThemeId;
use serde::Deserialize;
use std::path::Path;

/// Sequence of headless steps plus the environment they start in.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadlessScenario {
    #[serde(default)]
    pub setup: ScenarioSetup,
    pub steps: Vec<ScenarioStep>,
}

impl HeadlessScenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

/// Host state before the page mounts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScenarioSetup {
    /// Initial system "prefers dark" signal
    #[serde(default)]
    pub prefers_dark: bool,
    /// Raw value already in the preference slot; need not be a valid theme
    #[serde(default)]
    pub saved_theme: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    Wait { ms: u64 },
    Scroll { y: f32 },
    Navigate { section: Section },
    SetTheme { theme: ThemeId },
    SystemScheme { dark: bool },
    AssertTheme { theme: ThemeId },
    AssertHeadline { value: String },
    AssertRevealed { section: Section },
    AssertHidden { section: Section },
}

impl ScenarioStep {
    pub fn is_assertion(&self) -> bool {
        matches!(
            self,
            ScenarioStep::AssertTheme { .. }
                | ScenarioStep::AssertHeadline { .. }
                | ScenarioStep::AssertRevealed { .. }
                | ScenarioStep::AssertHidden { .. }
        )
    }
}
