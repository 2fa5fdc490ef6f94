use folio_app::{
    run_loaded_scenario, run_scenario, run_scenario_with_config, HeadlessHarness,
    HeadlessReport, HeadlessRunConfig, HeadlessScenario, ReportStatus, ScenarioSetup, Section,
};
use folio_theme::{PreferenceSlot, ThemeId};
use pretty_assertions::assert_eq;
use std::path::Path;

fn scenario_path(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("scenarios")
        .join(name)
}

#[test]
fn first_visit_scenario_passes() {
    let scenario = HeadlessScenario::from_path(&scenario_path("first_visit.json")).unwrap();
    let outcome = run_loaded_scenario(&scenario, &HeadlessRunConfig::default()).unwrap();

    assert!(!outcome.is_failed(), "{:?}", outcome.report());
    let report = outcome.report();
    assert_eq!(report.elapsed_ms, 300);
    assert!(report.snapshot.header_scrolled);
    assert!(report.snapshot.is_revealed(Section::About));
    assert!(!report.snapshot.is_revealed(Section::Projects));
}

#[test]
fn returning_visitor_keeps_saved_theme() {
    let scenario = HeadlessScenario::from_path(&scenario_path("returning_visitor.json")).unwrap();
    let outcome = run_loaded_scenario(&scenario, &HeadlessRunConfig::default()).unwrap();
    assert!(!outcome.is_failed(), "{:?}", outcome.report());
    assert_eq!(outcome.report().snapshot.theme, ThemeId::Purple);
}

#[test]
fn failed_assertion_reports_step() {
    let outcome = run_scenario(
        r#"{
            "steps": [
                { "type": "wait", "ms": 150 },
                { "type": "assert_headline", "value": "F" },
                { "type": "assert_headline", "value": "Frontend" }
            ]
        }"#,
    )
    .unwrap();

    assert!(outcome.is_failed());
    let report = outcome.report();
    assert_eq!(report.status, ReportStatus::Failed);
    assert_eq!(report.failed_step_index, Some(2));
    assert_eq!(report.assertion.as_deref(), Some("assert_headline"));
    assert_eq!(
        report.message.as_deref(),
        Some("expected headline 'Frontend', got 'F'")
    );
}

#[test]
fn unknown_saved_theme_behaves_like_absent() {
    let outcome = run_scenario(
        r#"{
            "setup": { "prefers_dark": true, "saved_theme": "neon" },
            "steps": [
                { "type": "assert_theme", "theme": "dark" },
                { "type": "system_scheme", "dark": false },
                { "type": "assert_theme", "theme": "light" }
            ]
        }"#,
    )
    .unwrap();
    assert!(!outcome.is_failed(), "{:?}", outcome.report());
}

#[test]
fn revealed_sections_never_hide_again() {
    let outcome = run_scenario(
        r#"{
            "steps": [
                { "type": "navigate", "section": "skills" },
                { "type": "assert_revealed", "section": "skills" },
                { "type": "navigate", "section": "home" },
                { "type": "assert_hidden", "section": "skills" }
            ]
        }"#,
    )
    .unwrap();

    assert!(outcome.is_failed());
    assert_eq!(outcome.report().failed_step_index, Some(3));
    assert_eq!(outcome.report().assertion.as_deref(), Some("assert_hidden"));
}

#[test]
fn reveal_waits_for_threshold_coverage() {
    let cfg = HeadlessRunConfig {
        height: 1200,
        ..HeadlessRunConfig::default()
    };
    // about content sits at 1280..2020; 20px of 740 is under the 10% threshold
    let outcome = run_scenario_with_config(
        r#"{
            "steps": [
                { "type": "scroll", "y": 100 },
                { "type": "assert_hidden", "section": "about" },
                { "type": "scroll", "y": 200 },
                { "type": "assert_revealed", "section": "about" }
            ]
        }"#,
        &cfg,
    )
    .unwrap();
    assert!(!outcome.is_failed(), "{:?}", outcome.report());
}

#[test]
fn malformed_scenarios_are_errors() {
    assert!(run_scenario("{").is_err());
    assert!(run_scenario(r#"{ "steps": [ { "type": "teleport" } ] }"#).is_err());
    assert!(run_scenario_with_config(
        r#"{ "steps": [] }"#,
        &HeadlessRunConfig {
            width: 0,
            ..HeadlessRunConfig::default()
        }
    )
    .is_err());
}

#[test]
fn harness_exposes_host_state() {
    let mut harness =
        HeadlessHarness::new(&HeadlessRunConfig::default(), &ScenarioSetup::default()).unwrap();
    harness.portfolio_mut().set_theme(ThemeId::Emerald);
    assert_eq!(
        harness.slot().read("portfolio-theme").unwrap().as_deref(),
        Some("emerald")
    );

    harness.navigate(Section::Projects);
    assert_eq!(
        harness.viewport().scroll_y(),
        harness.layout().scroll_offset(Section::Projects)
    );
    assert!(harness.portfolio().is_revealed(Section::Projects));
}

#[test]
fn report_round_trips_through_json_file() {
    let outcome = run_scenario(r#"{ "steps": [ { "type": "wait", "ms": 2000 } ] }"#).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports").join("run.json");
    assert!(path.is_absolute());
    outcome.report().write_to_path(&path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let parsed: HeadlessReport = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.status, ReportStatus::Passed);
    assert_eq!(parsed.elapsed_ms, 2000);
    assert_eq!(parsed.snapshot, outcome.report().snapshot);
    assert!(parsed.snapshot.hero_text_visible);

    assert!(outcome
        .report()
        .write_to_path(Path::new("../escape.json"))
        .is_err());
}
