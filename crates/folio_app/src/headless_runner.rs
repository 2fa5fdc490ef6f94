//! Scenario runner that drives a portfolio on virtual time.
//!
//! The page is mounted against in-memory capabilities: [`VirtualTimers`] for
//! the typewriter and intro, a [`SimulatedViewport`] laid out with
//! [`PageLayout::standard`] for scroll reveals, a [`MemorySlot`] for the
//! theme preference and a [`StaticScheme`] for the system signal. Runs are
//! fully deterministic.

use crate::app::{Portfolio, PortfolioHost, PortfolioSnapshot};
use crate::config::FolioConfig;
use crate::headless_assert::{
    evaluate_assert_headline, evaluate_assert_revealed, evaluate_assert_theme, AssertionResult,
};
use crate::headless_report::HeadlessReport;
use crate::headless_scenario::{HeadlessScenario, ScenarioSetup, ScenarioStep};
use crate::sections::{PageLayout, Section};
use anyhow::{bail, Result};
use folio_animation::SimulatedViewport;
use folio_core::VirtualTimers;
use folio_theme::{MemorySlot, StaticScheme};
use std::sync::Arc;
use std::time::Duration;

/// Configuration for a headless run.
#[derive(Debug, Clone)]
pub struct HeadlessRunConfig {
    /// Logical viewport width.
    pub width: u32,
    /// Logical viewport height.
    pub height: u32,
    /// Page configuration.
    pub app: FolioConfig,
}

impl Default for HeadlessRunConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            app: FolioConfig::default(),
        }
    }
}

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: HeadlessReport },
    Failed { report: HeadlessReport },
}

impl RunOutcome {
    pub fn report(&self) -> &HeadlessReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// A mounted portfolio plus the fake host around it
pub struct HeadlessHarness {
    timers: Arc<VirtualTimers>,
    viewport: Arc<SimulatedViewport>,
    system: Arc<StaticScheme>,
    slot: MemorySlot,
    layout: PageLayout,
    portfolio: Portfolio,
}

impl HeadlessHarness {
    pub fn new(cfg: &HeadlessRunConfig, setup: &ScenarioSetup) -> Result<Self> {
        if cfg.width == 0 || cfg.height == 0 {
            bail!("headless dimensions must be non-zero");
        }

        let (width, height) = (cfg.width as f32, cfg.height as f32);
        let layout = PageLayout::standard(width, height);
        let viewport = Arc::new(SimulatedViewport::new(width, height));
        for section in Section::all() {
            if let (Some(element), Some(bounds)) =
                (section.reveal_element(), layout.content_bounds(*section))
            {
                viewport.place(element, bounds);
            }
        }

        let slot = match &setup.saved_theme {
            Some(saved) => MemorySlot::with_value(&cfg.app.theme.storage_key, saved),
            None => MemorySlot::new(),
        };
        let timers = VirtualTimers::shared();
        let system = Arc::new(StaticScheme::new(setup.prefers_dark));

        let portfolio = Portfolio::new(
            cfg.app.clone(),
            PortfolioHost {
                slot: Arc::new(slot.clone()),
                system: system.clone(),
                scheduler: timers.clone(),
                intersections: viewport.clone(),
                headline_sink: None,
            },
        )?;

        Ok(Self {
            timers,
            viewport,
            system,
            slot,
            layout,
            portfolio,
        })
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn portfolio_mut(&mut self) -> &mut Portfolio {
        &mut self.portfolio
    }

    pub fn timers(&self) -> &Arc<VirtualTimers> {
        &self.timers
    }

    pub fn viewport(&self) -> &Arc<SimulatedViewport> {
        &self.viewport
    }

    /// The in-memory preference slot, shared with the theme store
    pub fn slot(&self) -> &MemorySlot {
        &self.slot
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.timers.now().as_millis()).unwrap_or(u64::MAX)
    }

    pub fn wait(&self, ms: u64) {
        self.timers.advance(Duration::from_millis(ms));
    }

    pub fn scroll_to(&mut self, y: f32) {
        let y = y.max(0.0);
        self.viewport.scroll_to(y);
        self.portfolio.on_scroll(y);
    }

    /// Follow a nav link and jump to the section
    pub fn navigate(&mut self, section: Section) {
        let target = self.portfolio.navigate(section);
        let y = self.layout.scroll_offset(target);
        self.scroll_to(y);
    }

    /// Flip the system signal and notify the page
    pub fn set_system_scheme(&self, dark: bool) {
        self.system.set(dark);
        self.portfolio.on_system_scheme_change(dark);
    }

    pub fn snapshot(&self) -> PortfolioSnapshot {
        self.portfolio.snapshot()
    }

    /// Apply one step; assertions return their name and result
    pub fn apply(&mut self, step: &ScenarioStep) -> Option<(&'static str, AssertionResult)> {
        match step {
            ScenarioStep::Wait { ms } => {
                self.wait(*ms);
                None
            }
            ScenarioStep::Scroll { y } => {
                self.scroll_to(*y);
                None
            }
            ScenarioStep::Navigate { section } => {
                self.navigate(*section);
                None
            }
            ScenarioStep::SetTheme { theme } => {
                self.portfolio.set_theme(*theme);
                None
            }
            ScenarioStep::SystemScheme { dark } => {
                self.set_system_scheme(*dark);
                None
            }
            ScenarioStep::AssertTheme { theme } => Some((
                "assert_theme",
                evaluate_assert_theme(*theme, &self.snapshot()),
            )),
            ScenarioStep::AssertHeadline { value } => Some((
                "assert_headline",
                evaluate_assert_headline(value, &self.snapshot()),
            )),
            ScenarioStep::AssertRevealed { section } => Some((
                "assert_revealed",
                evaluate_assert_revealed(*section, true, &self.snapshot()),
            )),
            ScenarioStep::AssertHidden { section } => Some((
                "assert_hidden",
                evaluate_assert_revealed(*section, false, &self.snapshot()),
            )),
        }
    }
}

/// Execute scenario JSON with the default run configuration.
pub fn run_scenario(input: &str) -> Result<RunOutcome> {
    run_scenario_with_config(input, &HeadlessRunConfig::default())
}

/// Execute scenario JSON with a custom run configuration.
pub fn run_scenario_with_config(input: &str, cfg: &HeadlessRunConfig) -> Result<RunOutcome> {
    let scenario = HeadlessScenario::from_json(input)?;
    run_loaded_scenario(&scenario, cfg)
}

/// Execute a pre-loaded scenario.
pub fn run_loaded_scenario(
    scenario: &HeadlessScenario,
    cfg: &HeadlessRunConfig,
) -> Result<RunOutcome> {
    let mut harness = HeadlessHarness::new(cfg, &scenario.setup)?;

    for (step_index, step) in scenario.steps.iter().enumerate() {
        tracing::trace!("headless step {}: {:?}", step_index, step);
        if let Some((assertion, AssertionResult::Failed { message, .. })) = harness.apply(step) {
            tracing::debug!("headless run failed at step {}: {}", step_index, message);
            let report = HeadlessReport::failed(
                assertion,
                step_index,
                message,
                harness.elapsed_ms(),
                harness.snapshot(),
            );
            return Ok(RunOutcome::Failed { report });
        }
    }

    Ok(RunOutcome::Passed {
        report: HeadlessReport::passed(harness.elapsed_ms(), harness.snapshot()),
    })
}
