//! Assertion helpers for headless scenarios.

use crate::app::PortfolioSnapshot;
use crate::sections::Section;
use folio_theme::ThemeId;

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

pub fn evaluate_assert_theme(expected: ThemeId, snapshot: &PortfolioSnapshot) -> AssertionResult {
    if snapshot.theme == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "theme_mismatch".to_string(),
            message: format!("expected theme '{expected}', got '{}'", snapshot.theme),
        }
    }
}

pub fn evaluate_assert_headline(expected: &str, snapshot: &PortfolioSnapshot) -> AssertionResult {
    if snapshot.headline == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "headline_mismatch".to_string(),
            message: format!("expected headline '{expected}', got '{}'", snapshot.headline),
        }
    }
}

pub fn evaluate_assert_revealed(
    section: Section,
    expect_visible: bool,
    snapshot: &PortfolioSnapshot,
) -> AssertionResult {
    let visible = snapshot.is_revealed(section);
    if visible == expect_visible {
        return AssertionResult::Passed;
    }

    let (code, state) = if expect_visible {
        ("still_hidden", "hidden")
    } else {
        ("already_revealed", "revealed")
    };
    AssertionResult::Failed {
        code: code.to_string(),
        message: format!("{}: section is {state}", section.anchor()),
    }
}
