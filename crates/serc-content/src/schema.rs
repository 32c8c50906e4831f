//! Typed document shapes for each section, and shape validation.
//!
//! The override machinery treats section values as opaque JSON. These types
//! describe what the pages actually render, so a document can be checked
//! before it is accepted instead of failing later inside presentation code.
//! Extra fields are tolerated; missing required fields and wrong types are
//! not.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::section::Section;

// ============================================================================
// Navigation, home page, about
// ============================================================================

/// A navigation entry, possibly with a dropdown of sub-links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    /// Display text
    pub name: String,
    /// Route path
    pub path: String,
    /// Nested entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_links: Option<Vec<NavLink>>,
}

/// A hero carousel slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroSlide {
    /// Image URL or data URL
    pub image: String,
    /// Headline
    pub title: String,
    /// Secondary line
    pub subtitle: String,
}

/// About page text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutContent {
    /// Short blurb for the home page
    pub short: String,
    /// Director's message
    pub director_message: String,
    /// Full overview
    pub overview: String,
}

/// A research area card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchArea {
    /// Area name
    pub name: String,
    /// Description
    pub description: String,
    /// Icon name
    pub icon: String,
}

// ============================================================================
// News, facilities, people, courses, contact
// ============================================================================

/// Kind of news item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NewsKind {
    /// General announcement
    Announcement,
    /// Workshop, usually with registration
    Workshop,
    /// Seminar
    Seminar,
}

/// A news or event entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsEvent {
    /// Stable id used in detail page routes
    pub id: String,
    /// Title
    pub title: String,
    /// Display date
    pub date: String,
    /// Kind of entry
    #[serde(rename = "type")]
    pub kind: NewsKind,
    /// Summary for listings
    pub summary: String,
    /// Image URL
    pub image: String,
    /// Body for the detail page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_content: Option<String>,
    /// Whether registration is open
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_open: Option<bool>,
    /// Registration deadline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_deadline: Option<String>,
}

/// A facility card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Infrastructure {
    /// Facility name
    pub name: String,
    /// Image URL
    pub image: String,
    /// Description
    pub description: String,
}

/// A person in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Full name
    pub name: String,
    /// Position
    pub title: String,
    /// Photo URL
    pub image: String,
    /// Research interests, faculty only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_interests: Option<Vec<String>>,
    /// Email address
    pub email: String,
}

/// The people directory, grouped by role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeopleContent {
    /// Faculty
    pub faculty: Vec<Person>,
    /// Scientific staff
    pub scientific_staff: Vec<Person>,
    /// Technical staff
    pub technical_staff: Vec<Person>,
    /// Administrative staff
    pub administrative_staff: Vec<Person>,
}

/// A course listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Course code
    pub code: String,
    /// Title
    pub title: String,
    /// Instructor name
    pub instructor: String,
    /// Description
    pub description: String,
}

/// Contact details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    /// Postal address
    pub address: String,
    /// Phone number
    pub phone: String,
    /// Email address
    pub email: String,
    /// Embedded map URL
    pub map_url: String,
}

// ============================================================================
// Systems
// ============================================================================

/// A label/value specification row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSpec {
    /// Label
    pub label: String,
    /// Value
    pub value: String,
}

/// A named hardware node with its specs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareNode {
    /// Node name
    pub name: String,
    /// Spec lines
    pub specs: Vec<String>,
}

/// Hardware architecture block of a system page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareArchitecture {
    /// Block title
    pub title: String,
    /// Nodes
    pub nodes: Vec<HardwareNode>,
}

/// A named link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedLink {
    /// Link text
    pub name: String,
    /// Route path
    pub path: String,
}

/// Software overview block of a system page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftwareOverview {
    /// Operating system
    pub os: String,
    /// Links to software pages
    pub links: Vec<NamedLink>,
}

/// One section of a job submission guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideSection {
    /// Section title
    pub title: String,
    /// Paragraphs
    pub content: Vec<String>,
    /// Rendered as a callout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_note: Option<bool>,
}

/// Job submission guide of a system page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSubmissionGuide {
    /// Guide title
    pub title: String,
    /// Guide sections
    pub sections: Vec<GuideSection>,
}

/// A compute system detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemDetail {
    /// System name
    pub name: String,
    /// Image URL
    pub image: String,
    /// Overview text
    pub overview: String,
    /// Specification rows
    pub specifications: Vec<SystemSpec>,
    /// Usage policy text
    pub usage_policy: String,
    /// Hardware block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware_architecture: Option<HardwareArchitecture>,
    /// Software block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub software_overview: Option<SoftwareOverview>,
    /// Job submission guide
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_submission_guide: Option<JobSubmissionGuide>,
}

// ============================================================================
// Software catalogue
// ============================================================================

/// Button colour on a software detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonColor {
    /// Blue
    Blue,
    /// Orange
    Orange,
    /// Green
    Green,
}

/// A link button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailSectionButton {
    /// Button text
    pub label: String,
    /// Target URL
    pub url: String,
    /// Colour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ButtonColor>,
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell text
    pub text: String,
    /// Icon name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Colour name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Bold text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
}

/// A text/url link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLink {
    /// Link text
    pub text: String,
    /// Target URL
    pub url: String,
}

/// An image placeholder caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageCaption {
    /// Caption text
    pub caption: String,
}

/// How a software detail section is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailKind {
    /// Paragraph and optional list
    Text,
    /// Table with headers and rows
    Table,
    /// Ordered steps with buttons
    Steps,
    /// Grid of versions
    Grid,
    /// Image placeholders
    Images,
}

/// A block on a software detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailSection {
    /// Rendering kind
    #[serde(rename = "type")]
    pub kind: DetailKind,
    /// Heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Paragraph text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Bullet list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<String>>,
    /// Table headers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<String>>,
    /// Table rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Vec<TableCell>>>,
    /// Footnote
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Intro before steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    /// Buttons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<DetailSectionButton>>,
    /// Ordered steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<String>>,
    /// Grid entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_items: Option<Vec<String>>,
    /// Link under the grid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_link: Option<TextLink>,
    /// Image placeholders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImageCaption>>,
}

/// A software package in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareItem {
    /// Package name
    pub name: String,
    /// Installed version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Description
    pub description: String,
    /// Title of the detail page, when one exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details_page_title: Option<String>,
    /// Detail page blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<DetailSection>>,
}

/// A group of software packages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftwareCategory {
    /// Category id
    pub id: String,
    /// Category name
    pub name: String,
    /// Packages
    pub items: Vec<SoftwareItem>,
}

/// An offered service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Service id
    pub id: String,
    /// Name
    pub name: String,
    /// Description
    pub description: String,
}

// ============================================================================
// Validation
// ============================================================================

/// Checks that `value` has the shape pages expect for `section`.
pub fn validate(section: Section, value: &Value) -> Result<()> {
    match section {
        Section::NavLinks => check::<Vec<NavLink>>(section, value),
        Section::HeroSlides => check::<Vec<HeroSlide>>(section, value),
        Section::About => check::<AboutContent>(section, value),
        Section::ResearchAreas => check::<Vec<ResearchArea>>(section, value),
        Section::NewsAndEvents => check::<Vec<NewsEvent>>(section, value),
        Section::Infrastructures => check::<Vec<Infrastructure>>(section, value),
        Section::People => check::<PeopleContent>(section, value),
        Section::Courses => check::<Vec<Course>>(section, value),
        Section::Contact => check::<ContactInfo>(section, value),
        Section::Systems => check::<BTreeMap<String, SystemDetail>>(section, value),
        Section::Software => check::<Vec<SoftwareCategory>>(section, value),
        Section::Services => check::<Vec<Service>>(section, value),
    }
}

fn check<T: DeserializeOwned>(section: Section, value: &Value) -> Result<()> {
    T::deserialize(value)
        .map(|_| ())
        .map_err(|e| Error::schema(section, e.to_string()))
}
