//! Static page content

use serde::Serialize;

/// Portfolio owner
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Profile {
    pub name: &'static str,
    pub location: &'static str,
    pub phone: &'static str,
}

pub const PROFILE: Profile = Profile {
    name: "Muhammad Ravi Rizkhan",
    location: "Sumatra Barat, Indonesia",
    phone: "+6281268088246",
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialKind {
    GitHub,
    LinkedIn,
    Instagram,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct SocialLink {
    pub kind: SocialKind,
    pub url: &'static str,
}

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink {
        kind: SocialKind::GitHub,
        url: "https://github.com/ravirizkhan7",
    },
    SocialLink {
        kind: SocialKind::LinkedIn,
        url: "https://www.linkedin.com/in/muhammad-ravi-rizkhan-59111925b/",
    },
    SocialLink {
        kind: SocialKind::Instagram,
        url: "https://www.instagram.com/ravi_rizkhan/",
    },
];

/// A project card
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub tags: &'static [&'static str],
    pub link: &'static str,
}

impl Project {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag)
    }
}

pub const PROJECTS: &[Project] = &[
    Project {
        id: 1,
        title: "E-Commerce Website",
        description: "A fully responsive e-commerce platform with cart functionality and payment integration.",
        image: "https://images.pexels.com/photos/5077049/pexels-photo-5077049.jpeg",
        tags: &["React", "Redux", "Tailwind CSS", "Node.js"],
        link: "https://example.com/project1",
    },
    Project {
        id: 2,
        title: "Task Management App",
        description: "A productivity application for organizing and tracking personal and team tasks.",
        image: "https://images.pexels.com/photos/8391470/pexels-photo-8391470.jpeg",
        tags: &["React", "TypeScript", "Firebase"],
        link: "https://example.com/project2",
    },
    Project {
        id: 3,
        title: "Travel Blog",
        description: "A beautiful blog for sharing travel experiences with a custom CMS for easy content management.",
        image: "https://images.pexels.com/photos/3935702/pexels-photo-3935702.jpeg",
        tags: &["Next.js", "Sanity.io", "Framer Motion"],
        link: "https://example.com/project3",
    },
    Project {
        id: 4,
        title: "Music Streaming App",
        description: "A music player with playlist management and audio visualization features.",
        image: "https://images.pexels.com/photos/1389429/pexels-photo-1389429.jpeg",
        tags: &["React", "Web Audio API", "Styled Components"],
        link: "https://example.com/project4",
    },
    Project {
        id: 5,
        title: "Weather Dashboard",
        description: "A weather application with real-time updates, forecasts, and location-based services.",
        image: "https://images.pexels.com/photos/1118873/pexels-photo-1118873.jpeg",
        tags: &["Vue.js", "Weather API", "Chart.js"],
        link: "https://example.com/project5",
    },
    Project {
        id: 6,
        title: "Portfolio Template",
        description: "A customizable portfolio template for developers and designers to showcase their work.",
        image: "https://images.pexels.com/photos/1779487/pexels-photo-1779487.jpeg",
        tags: &["HTML", "CSS", "JavaScript"],
        link: "https://example.com/project6",
    },
];

/// Skill column on the skills section
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Frontend,
    Design,
    Other,
}

impl SkillCategory {
    pub fn all() -> &'static [SkillCategory] {
        &[
            SkillCategory::Frontend,
            SkillCategory::Design,
            SkillCategory::Other,
        ]
    }

    pub fn title(self) -> &'static str {
        match self {
            SkillCategory::Frontend => "Frontend Development",
            SkillCategory::Design => "Design",
            SkillCategory::Other => "Other Skills",
        }
    }

    pub fn skills(self) -> &'static [Skill] {
        match self {
            SkillCategory::Frontend => FRONTEND_SKILLS,
            SkillCategory::Design => DESIGN_SKILLS,
            SkillCategory::Other => OTHER_SKILLS,
        }
    }
}

/// A skill bar; `level` is a percentage
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Skill {
    pub name: &'static str,
    level: u8,
}

impl Skill {
    /// Levels above 100 are clamped
    pub const fn new(name: &'static str, level: u8) -> Self {
        let level = if level > 100 { 100 } else { level };
        Self { name, level }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Bar fill in `0.0..=1.0`
    pub fn fill(&self) -> f32 {
        f32::from(self.level) / 100.0
    }
}

const FRONTEND_SKILLS: &[Skill] = &[
    Skill::new("HTML & CSS", 95),
    Skill::new("JavaScript", 90),
    Skill::new("React", 88),
    Skill::new("TypeScript", 85),
    Skill::new("Tailwind CSS", 92),
];

const DESIGN_SKILLS: &[Skill] = &[
    Skill::new("Figma", 90),
    Skill::new("Adobe XD", 85),
    Skill::new("UI Design", 88),
    Skill::new("UX Research", 80),
    Skill::new("Prototyping", 87),
];

const OTHER_SKILLS: &[Skill] = &[
    Skill::new("Node.js", 75),
    Skill::new("Git & GitHub", 88),
    Skill::new("RESTful APIs", 85),
    Skill::new("Responsive Design", 95),
    Skill::new("Performance Optimization", 80),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut ids: Vec<u32> = PROJECTS.iter().map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_skill_levels_clamped() {
        assert_eq!(Skill::new("Overconfidence", 250).level(), 100);
        assert_eq!(Skill::new("Rust", 0).fill(), 0.0);
        for category in SkillCategory::all() {
            assert_eq!(category.skills().len(), 5);
            assert!(category.skills().iter().all(|s| s.level() <= 100));
        }
    }
}
