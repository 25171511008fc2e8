//! Core types for the outline
//!
//! Defines the fundamental planning types:
//! - Section identifiers and heading levels
//! - Completion statuses and their progress weights
//! - Planning items, their TOC projection and derived statistics
//! - The persisted plan snapshot

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique section identifier (monotonic within a plan, never reused)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(pub u32);

impl SectionId {
    /// Raw numeric value
    #[inline]
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Heading depth of a section
///
/// Serialized as the integers `1` and `2`; anything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Level {
    /// Top-level chapter
    One,
    /// Subsection
    Two,
}

impl Level {
    /// Numeric depth (1 or 2)
    #[inline]
    #[must_use]
    pub fn depth(self) -> u8 {
        match self {
            Level::One => 1,
            Level::Two => 2,
        }
    }

    /// Nesting steps below the top level (0 or 1)
    #[inline]
    #[must_use]
    pub fn nesting(self) -> u8 {
        self.depth() - 1
    }

    /// Map a detected heading depth onto a planning level
    #[inline]
    #[must_use]
    pub fn from_depth(depth: u8) -> Option<Self> {
        match depth {
            1 => Some(Level::One),
            2 => Some(Level::Two),
            _ => None,
        }
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.depth()
    }
}

impl TryFrom<u8> for Level {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Level::from_depth(value).ok_or_else(|| format!("invalid heading level {value}, expected 1 or 2"))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.depth())
    }
}

/// Completion status of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Nothing written yet
    #[default]
    Empty,
    /// Heading exists in the document
    Created,
    /// First draft written
    Drafted,
    /// Content checked
    Checked,
    /// References added
    Referenced,
    /// Edited
    Edited,
    /// Verified
    Verified,
    /// Done
    Finalized,
}

impl Status {
    /// All statuses in workflow order
    pub const ALL: [Status; 8] = [
        Status::Empty,
        Status::Created,
        Status::Drafted,
        Status::Checked,
        Status::Referenced,
        Status::Edited,
        Status::Verified,
        Status::Finalized,
    ];

    /// Progress weight on a 0..=100 scale
    #[inline]
    #[must_use]
    pub fn progress(self) -> u32 {
        match self {
            Status::Empty => 0,
            Status::Created => 5,
            Status::Drafted => 20,
            Status::Checked => 30,
            Status::Referenced => 50,
            Status::Edited => 70,
            Status::Verified => 90,
            Status::Finalized => 100,
        }
    }

    /// Human-readable label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Status::Empty => "Empty",
            Status::Created => "Created",
            Status::Drafted => "Drafted",
            Status::Checked => "Checked",
            Status::Referenced => "Referenced",
            Status::Edited => "Edited",
            Status::Verified => "Verified",
            Status::Finalized => "Finalized",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Content volume attributed to a section
///
/// Always derived from the document, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionStats {
    /// Whitespace-delimited words
    pub words: u32,
    /// Non-empty paragraphs
    pub paragraphs: u32,
    /// Paragraphs mentioning a table
    pub tables: u32,
    /// Paragraphs mentioning a figure or image
    pub graphics: u32,
}

impl SectionStats {
    /// All counters at zero
    #[inline]
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }
}

/// One planning entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineItem {
    /// Identifier
    pub id: SectionId,
    /// Section title
    pub title: String,
    /// Heading depth
    pub level: Level,
    /// Completion status
    #[serde(default)]
    pub status: Status,
    /// Free-form notes
    #[serde(default)]
    pub comments: String,
    /// Seeded from the template (protected from deletion)
    #[serde(default)]
    pub is_default: bool,
    /// Derived statistics
    #[serde(skip)]
    pub stats: SectionStats,
}

impl OutlineItem {
    /// Create a user-authored item with empty status
    #[inline]
    #[must_use]
    pub fn new(id: SectionId, title: impl Into<String>, level: Level) -> Self {
        Self {
            id,
            title: title.into(),
            level,
            status: Status::Empty,
            comments: String::new(),
            is_default: false,
            stats: SectionStats::zero(),
        }
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// With comments
    #[inline]
    #[must_use]
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    /// Mark as template-seeded
    #[inline]
    #[must_use]
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Case-insensitive exact title comparison
    #[must_use]
    pub fn title_matches(&self, text: &str) -> bool {
        self.title.to_lowercase() == text.to_lowercase()
    }

    /// TOC projection of this item
    #[must_use]
    pub fn toc_item(&self) -> TocItem {
        TocItem {
            id: self.id,
            title: self.title.clone(),
            level: self.level,
            is_default: self.is_default,
        }
    }
}

/// Projection of an [`OutlineItem`] used for document structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TocItem {
    /// Identifier shared with the planning item
    pub id: SectionId,
    /// Section title
    pub title: String,
    /// Heading depth
    pub level: Level,
    /// Seeded from the template
    #[serde(default)]
    pub is_default: bool,
}

/// Persisted form of a plan
///
/// Statistics are stripped; they are recomputed after every load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSnapshot {
    /// TOC projection
    pub toc_items: Vec<TocItem>,
    /// Planning entries
    pub planning_items: Vec<OutlineItem>,
}

impl PlanSnapshot {
    /// Parse a snapshot from its JSON form
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Render the snapshot as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Whether both lists are empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toc_items.is_empty() && self.planning_items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Level::Two).unwrap(), "2");
        assert_eq!(serde_json::from_str::<Level>("1").unwrap(), Level::One);
        assert!(serde_json::from_str::<Level>("3").is_err());
    }

    #[test]
    fn status_progress_scale() {
        assert_eq!(Status::Empty.progress(), 0);
        assert_eq!(Status::Referenced.progress(), 50);
        assert_eq!(Status::Finalized.progress(), 100);
        assert_eq!(Status::default(), Status::Empty);
    }

    #[test]
    fn status_uses_lowercase_keys() {
        assert_eq!(serde_json::to_string(&Status::Verified).unwrap(), "\"verified\"");
    }

    #[test]
    fn item_json_omits_stats() {
        let mut item = OutlineItem::new(SectionId(4), "Results", Level::One);
        item.stats.words = 120;

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["isDefault"], false);
        assert_eq!(json["level"], 1);
        assert!(json.get("stats").is_none());
        assert!(json.get("words").is_none());
    }

    #[test]
    fn title_match_ignores_case() {
        let item = OutlineItem::new(SectionId(1), "Literature Review", Level::One);
        assert!(item.title_matches("literature REVIEW"));
        assert!(!item.title_matches("Literature"));
    }
}
