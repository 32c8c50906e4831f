//! The fixed set of independently editable content sections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One independently addressable unit of site content.
///
/// The set is closed: every section has a baseline document named
/// `<name>.json` under the content root, and overrides may only be keyed by
/// these names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    /// Top navigation links and their sub-links.
    NavLinks,
    /// Home page carousel slides.
    HeroSlides,
    /// About text and director's message.
    About,
    /// Research area cards.
    ResearchAreas,
    /// News items, announcements, workshops, seminars.
    NewsAndEvents,
    /// Facilities overview.
    Infrastructures,
    /// Faculty and staff directory.
    People,
    /// Course catalogue.
    Courses,
    /// Contact details.
    Contact,
    /// Compute system detail pages, keyed by system id.
    Systems,
    /// Software catalogue.
    Software,
    /// Offered services.
    Services,
}

impl Section {
    /// Every known section, in load order.
    pub const ALL: [Section; 12] = [
        Section::NavLinks,
        Section::HeroSlides,
        Section::About,
        Section::ResearchAreas,
        Section::NewsAndEvents,
        Section::Infrastructures,
        Section::People,
        Section::Courses,
        Section::Contact,
        Section::Systems,
        Section::Software,
        Section::Services,
    ];

    /// The section's key, as used in storage and file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::NavLinks => "navLinks",
            Section::HeroSlides => "heroSlides",
            Section::About => "about",
            Section::ResearchAreas => "researchAreas",
            Section::NewsAndEvents => "newsAndEvents",
            Section::Infrastructures => "infrastructures",
            Section::People => "people",
            Section::Courses => "courses",
            Section::Contact => "contact",
            Section::Systems => "systems",
            Section::Software => "software",
            Section::Services => "services",
        }
    }

    /// Baseline document file name relative to the content root.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }

    /// Human-readable title for admin listings.
    pub fn label(&self) -> &'static str {
        match self {
            Section::NavLinks => "Navigation",
            Section::HeroSlides => "Hero Carousel",
            Section::About => "About",
            Section::ResearchAreas => "Research Areas",
            Section::NewsAndEvents => "News & Events",
            Section::Infrastructures => "Infrastructure",
            Section::People => "People",
            Section::Courses => "Courses",
            Section::Contact => "Contact",
            Section::Systems => "Systems",
            Section::Software => "Software",
            Section::Services => "Services",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .iter()
            .copied()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| Error::UnknownSection(s.to_string()))
    }
}
