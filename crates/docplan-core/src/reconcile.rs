//! Plan/document reconciliation
//!
//! Computes the two-way difference between the outline and the headings
//! present in the document:
//! - Document headings missing from the plan become new sections, placed by
//!   document position
//! - Level-1 sections missing from the document are queued for insertion
//!
//! Reconciliation only ever adds. Nothing is removed on either side.

use docplan_document::DocumentHeading;
use docplan_outline::{default_comment, Level, OutlineModel, SectionId, Status, TocItem};
use std::fmt;

/// Counts reported after a sync
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncSummary {
    /// Sections created from document headings
    pub added_to_plan: usize,
    /// Headings queued for insertion into the document
    pub added_to_document: usize,
}

impl SyncSummary {
    /// Whether the sync changed nothing
    #[inline]
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.added_to_plan == 0 && self.added_to_document == 0
    }
}

impl fmt::Display for SyncSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sync complete! {} headings added to plan. {} headings added to document.",
            self.added_to_plan, self.added_to_document
        )
    }
}

/// Result of reconciling an outline against document headings
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// Outline with the new sections inserted
    pub outline: OutlineModel,
    /// Ids of the sections created from document headings
    pub added_to_plan: Vec<SectionId>,
    /// Level-1 sections the document lacks, in plan order
    pub additions_to_document: Vec<TocItem>,
    /// Counts of both directions
    pub summary: SyncSummary,
}

/// Two-way outline/document differ
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconciliationEngine;

impl ReconciliationEngine {
    /// Create a new engine
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Reconcile `outline` with `headings`
    ///
    /// Only level-1 and level-2 headings with non-empty text take part. When
    /// none qualify the result is a no-op in both directions.
    #[must_use]
    pub fn reconcile(&self, outline: &OutlineModel, headings: &[DocumentHeading]) -> Reconciliation {
        let headings: Vec<(&DocumentHeading, Level)> = headings
            .iter()
            .filter(|h| !h.text.is_empty())
            .filter_map(|h| Level::from_depth(h.level).map(|level| (h, level)))
            .collect();

        if headings.is_empty() {
            tracing::debug!("no recognized headings, nothing to reconcile");
            return Reconciliation {
                outline: outline.clone(),
                added_to_plan: Vec::new(),
                additions_to_document: Vec::new(),
                summary: SyncSummary::default(),
            };
        }

        let additions_to_document: Vec<TocItem> = outline
            .items()
            .iter()
            .filter(|item| item.level == Level::One)
            .filter(|item| !headings.iter().any(|(h, _)| item.title_matches(&h.text)))
            .map(|item| item.toc_item())
            .collect();

        let mut updated = outline.clone();
        let mut added_to_plan = Vec::new();

        for (heading, level) in &headings {
            if updated.find_by_title(&heading.text).is_some() {
                continue;
            }

            let index = insertion_index(&updated, &headings, heading.index);
            let id = updated.insert_section(
                index,
                heading.text.clone(),
                *level,
                Status::Created,
                default_comment(&heading.text),
            );
            tracing::debug!(%id, title = %heading.text, index, "heading added to plan");
            added_to_plan.push(id);
        }

        let summary = SyncSummary {
            added_to_plan: added_to_plan.len(),
            added_to_document: additions_to_document.len(),
        };

        Reconciliation {
            outline: updated,
            added_to_plan,
            additions_to_document,
            summary,
        }
    }
}

/// Index of the first section whose matching heading sits after `position`
/// in the document, or the end of the list
fn insertion_index(outline: &OutlineModel, headings: &[(&DocumentHeading, Level)], position: usize) -> usize {
    outline
        .items()
        .iter()
        .position(|item| {
            headings
                .iter()
                .find(|(h, _)| item.title_matches(&h.text))
                .is_some_and(|(h, _)| h.index > position)
        })
        .unwrap_or(outline.len())
}
