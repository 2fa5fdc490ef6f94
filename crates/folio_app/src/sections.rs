//! Page sections and their layout

use folio_animation::ElementId;
use folio_core::Rect;
use serde::{Deserialize, Serialize};

/// Top-level page section, in page order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Home,
    About,
    Projects,
    Skills,
    Contact,
}

impl Section {
    pub fn all() -> &'static [Section] {
        &[
            Section::Home,
            Section::About,
            Section::Projects,
            Section::Skills,
            Section::Contact,
        ]
    }

    /// Anchor id used by navigation links
    pub fn anchor(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::About => "about",
            Section::Projects => "projects",
            Section::Skills => "skills",
            Section::Contact => "contact",
        }
    }

    pub fn nav_label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::About => "About",
            Section::Projects => "Projects",
            Section::Skills => "Skills",
            Section::Contact => "Contact",
        }
    }

    /// Parse `about` or `#about`
    pub fn from_anchor(anchor: &str) -> Option<Section> {
        let anchor = anchor.strip_prefix('#').unwrap_or(anchor);
        Section::all().iter().copied().find(|s| s.anchor() == anchor)
    }

    /// Content block revealed on scroll; the hero has its own intro instead
    pub fn reveal_element(self) -> Option<ElementId> {
        match self {
            Section::Home => None,
            Section::About => Some(ElementId(1)),
            Section::Projects => Some(ElementId(2)),
            Section::Skills => Some(ElementId(3)),
            Section::Contact => Some(ElementId(4)),
        }
    }

    pub fn from_reveal_element(element: ElementId) -> Option<Section> {
        Section::all()
            .iter()
            .copied()
            .find(|s| s.reveal_element() == Some(element))
    }
}

/// Vertical padding of each non-hero section (`py-20`)
const SECTION_PADDING: f32 = 80.0;

/// Document-space bounds of every section
#[derive(Clone, Debug, PartialEq)]
pub struct PageLayout {
    sections: Vec<(Section, Rect)>,
}

impl PageLayout {
    /// Desktop layout: a full-height hero followed by stacked sections
    pub fn standard(width: f32, viewport_height: f32) -> Self {
        let heights = [
            (Section::Home, viewport_height.max(640.0)),
            (Section::About, 900.0),
            (Section::Projects, 1500.0),
            (Section::Skills, 900.0),
            (Section::Contact, 1100.0),
        ];

        let mut y = 0.0;
        let sections = heights
            .into_iter()
            .map(|(section, height)| {
                let rect = Rect::new(0.0, y, width, height);
                y += height;
                (section, rect)
            })
            .collect();
        Self { sections }
    }

    pub fn bounds(&self, section: Section) -> Option<Rect> {
        self.sections
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, rect)| *rect)
    }

    /// Bounds of the section's revealable content block
    pub fn content_bounds(&self, section: Section) -> Option<Rect> {
        let bounds = self.bounds(section)?;
        Some(Rect::new(
            bounds.x(),
            bounds.y() + SECTION_PADDING,
            bounds.width(),
            (bounds.height() - 2.0 * SECTION_PADDING).max(0.0),
        ))
    }

    /// Scroll offset that brings `section` to the top of the viewport
    pub fn scroll_offset(&self, section: Section) -> f32 {
        self.bounds(section).map(|r| r.y()).unwrap_or(0.0)
    }

    pub fn height(&self) -> f32 {
        self.sections
            .last()
            .map(|(_, rect)| rect.bottom())
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Section, Rect)> + '_ {
        self.sections.iter().copied()
    }
}
