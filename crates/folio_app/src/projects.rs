//! Project grid filtering

use crate::content::{Project, PROJECTS};

/// Pseudo-tag that shows every project
pub const ALL_TAG: &str = "All";

/// Tag filter over a project catalog
#[derive(Clone, Debug)]
pub struct ProjectFilter {
    catalog: &'static [Project],
    tags: Vec<&'static str>,
    selected: &'static str,
}

impl Default for ProjectFilter {
    fn default() -> Self {
        Self::new(PROJECTS)
    }
}

impl ProjectFilter {
    pub fn new(catalog: &'static [Project]) -> Self {
        let mut tags = vec![ALL_TAG];
        for tag in catalog.iter().flat_map(|p| p.tags.iter().copied()) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        Self {
            catalog,
            tags,
            selected: ALL_TAG,
        }
    }

    /// `"All"` followed by every tag in first-seen order
    pub fn all_tags(&self) -> &[&'static str] {
        &self.tags
    }

    pub fn selected(&self) -> &'static str {
        self.selected
    }

    /// Select a tag; unknown tags fall back to `"All"`
    pub fn select(&mut self, tag: &str) -> &'static str {
        self.selected = match self.tags.iter().find(|t| **t == tag) {
            Some(known) => *known,
            None => {
                tracing::debug!("ProjectFilter::select - unknown tag '{}', showing all", tag);
                ALL_TAG
            }
        };
        self.selected
    }

    pub fn visible(&self) -> Vec<&'static Project> {
        let catalog = self.catalog;
        if self.selected == ALL_TAG {
            return catalog.iter().collect();
        }
        catalog.iter().filter(|p| p.has_tag(self.selected)).collect()
    }
}
