//! Section statistics
//!
//! Attributes content volume to outline sections by proximity to the
//! headings actually present in the document. Each heading opens a segment
//! that runs up to the next heading; a segment is credited to the first
//! section whose title and the heading text contain one another, ignoring
//! case.
//!
//! The substring match is an approximation: a short title such as "Results"
//! also matches a heading like "Secondary findings results discussion".

use docplan_document::{detect_headings, HeadingRule, Paragraph};
use docplan_outline::{OutlineModel, SectionId, SectionStats};

/// Content counted under one document heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentStats {
    /// Heading text that opens the segment
    pub heading: String,
    /// Paragraph index of the heading
    pub index: usize,
    /// Counters for the paragraphs up to the next heading
    pub stats: SectionStats,
}

/// Result of a statistics refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatisticsOutcome {
    /// Statistics were recomputed from the document
    Updated {
        /// Segments found in the document
        segments: usize,
        /// Sections credited with a segment
        matched: usize,
    },
    /// The document could not be read; section statistics were left as-is
    Unavailable {
        /// Why the document could not be read
        reason: String,
    },
}

impl StatisticsOutcome {
    /// Whether statistics were recomputed
    #[inline]
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

/// Heading-proximity statistics collector
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticsCollector {
    rule: HeadingRule,
}

impl StatisticsCollector {
    /// Create a collector using `rule` to find headings
    #[inline]
    #[must_use]
    pub fn new(rule: HeadingRule) -> Self {
        Self { rule }
    }

    /// Split the body into heading-led segments and count each one
    ///
    /// Paragraphs before the first heading belong to no segment.
    #[must_use]
    pub fn segments(&self, paragraphs: &[Paragraph]) -> Vec<SegmentStats> {
        let headings = detect_headings(paragraphs, self.rule);

        headings
            .iter()
            .enumerate()
            .map(|(k, heading)| {
                let end = headings.get(k + 1).map_or(paragraphs.len(), |next| next.index);
                SegmentStats {
                    heading: heading.text.clone(),
                    index: heading.index,
                    stats: count(&paragraphs[heading.index + 1..end]),
                }
            })
            .collect()
    }

    /// Credit segments to matching sections; returns the ids that matched
    ///
    /// Unmatched sections keep whatever statistics they had.
    pub fn attribute(&self, outline: &mut OutlineModel, segments: &[SegmentStats]) -> Vec<SectionId> {
        let updates: Vec<(SectionId, SectionStats)> = outline
            .items()
            .iter()
            .filter_map(|item| {
                segments
                    .iter()
                    .find(|segment| titles_overlap(&item.title, &segment.heading))
                    .map(|segment| (item.id, segment.stats))
            })
            .collect();

        updates
            .into_iter()
            .filter_map(|(id, stats)| outline.set_stats(id, stats).ok().map(|()| id))
            .collect()
    }
}

fn count(paragraphs: &[Paragraph]) -> SectionStats {
    let mut stats = SectionStats::zero();
    for paragraph in paragraphs {
        let text = paragraph.text.trim();
        if text.is_empty() {
            continue;
        }
        stats.paragraphs += 1;
        stats.words += text.split_whitespace().count() as u32;

        let lower = text.to_lowercase();
        if lower.contains("table") {
            stats.tables += 1;
        }
        if lower.contains("figure") || lower.contains("image") {
            stats.graphics += 1;
        }
    }
    stats
}

/// Case-insensitive substring match in either direction; empty never matches
fn titles_overlap(title: &str, heading: &str) -> bool {
    let title = title.trim().to_lowercase();
    let heading = heading.trim().to_lowercase();
    if title.is_empty() || heading.is_empty() {
        return false;
    }
    heading.contains(&title) || title.contains(&heading)
}
