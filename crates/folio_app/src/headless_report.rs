//! Report output model for headless scenario runs.

use crate::app::PortfolioSnapshot;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Component, Path};

/// Report status for a headless run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// Machine-readable result of a headless run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessReport {
    pub status: ReportStatus,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub message: Option<String>,
    /// Virtual time at the end of the run
    pub elapsed_ms: u64,
    /// Page state when the run ended
    pub snapshot: PortfolioSnapshot,
}

impl HeadlessReport {
    pub fn passed(elapsed_ms: u64, snapshot: PortfolioSnapshot) -> Self {
        Self {
            status: ReportStatus::Passed,
            failed_step_index: None,
            assertion: None,
            message: None,
            elapsed_ms,
            snapshot,
        }
    }

    pub fn failed(
        assertion: &str,
        failed_step_index: usize,
        message: String,
        elapsed_ms: u64,
        snapshot: PortfolioSnapshot,
    ) -> Self {
        Self {
            status: ReportStatus::Failed,
            failed_step_index: Some(failed_step_index),
            assertion: Some(assertion.to_string()),
            message: Some(message),
            elapsed_ms,
            snapshot,
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == ReportStatus::Passed
    }

    /// Write pretty JSON to `path`, creating parent directories.
    ///
    /// Absolute paths are allowed so reports can land in temp or CI output
    /// dirs; only `..` components are rejected.
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            bail!("report path cannot contain '..': {}", path.display());
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let payload = serde_json::to_string_pretty(self)?;
        std::fs::write(path, payload)
            .with_context(|| format!("failed to write report to {}", path.display()))
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
