//! Outline model
//!
//! The single in-memory owner of a plan. The planning list is the source of
//! truth; the TOC list is projected from it, so both always carry the same
//! ids in the same order.

use crate::error::OutlineError;
use crate::template::{template_items, TEMPLATE_LEN};
use crate::types::{
    Level, OutlineItem, PlanSnapshot, SectionId, SectionStats, Status, TocItem,
};
use std::collections::BTreeSet;

/// Title given to freshly added sections
pub const NEW_SECTION_TITLE: &str = "New Section";

/// Ordered planning list with its id counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineModel {
    items: Vec<OutlineItem>,
    next_id: u32,
}

impl OutlineModel {
    /// Create an empty plan (`next_id = 1`)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a plan seeded with the default template
    #[must_use]
    pub fn with_template() -> Self {
        let mut model = Self::new();
        model.seed_template();
        model
    }

    /// Rebuild a plan from its persisted form
    ///
    /// Statistics start at zero and `next_id` is re-derived as `max(id) + 1`.
    ///
    /// # Errors
    /// - `OutlineError::DuplicateId` if an id repeats in either list
    /// - `OutlineError::LockStepViolation` if the two lists disagree on ids
    pub fn from_snapshot(snapshot: PlanSnapshot) -> Result<Self, OutlineError> {
        let toc = unique_ids(snapshot.toc_items.iter().map(|t| t.id))?;
        let planning = unique_ids(snapshot.planning_items.iter().map(|i| i.id))?;

        if toc != planning {
            return Err(OutlineError::LockStepViolation {
                toc: toc.into_iter().collect(),
                planning: planning.into_iter().collect(),
            });
        }

        let items: Vec<OutlineItem> = snapshot
            .planning_items
            .into_iter()
            .map(|mut item| {
                item.stats = SectionStats::zero();
                item
            })
            .collect();

        let next_id = planning.last().map_or(1, |max| max.0 + 1);
        tracing::debug!(sections = items.len(), next_id, "outline restored from snapshot");

        Ok(Self { items, next_id })
    }

    /// Persisted form of the plan (statistics stripped)
    #[must_use]
    pub fn snapshot(&self) -> PlanSnapshot {
        PlanSnapshot {
            toc_items: self.toc_items(),
            planning_items: self
                .items
                .iter()
                .map(|item| OutlineItem {
                    stats: SectionStats::zero(),
                    ..item.clone()
                })
                .collect(),
        }
    }

    /// Replace the plan with the default template (`next_id = 32`)
    pub fn seed_template(&mut self) {
        self.items = template_items();
        self.next_id = TEMPLATE_LEN as u32 + 1;
        tracing::debug!(sections = self.items.len(), "template seeded");
    }

    /// Drop every section and restart ids at 1
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_id = 1;
    }

    /// Planning items in plan order
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[OutlineItem] {
        &self.items
    }

    /// TOC projection in plan order
    #[must_use]
    pub fn toc_items(&self) -> Vec<TocItem> {
        self.items.iter().map(OutlineItem::toc_item).collect()
    }

    /// Number of sections
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the plan has no sections
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Id the next new section will receive
    #[inline]
    #[must_use]
    pub fn next_id(&self) -> SectionId {
        SectionId(self.next_id)
    }

    /// Look up a section
    #[must_use]
    pub fn get(&self, id: SectionId) -> Option<&OutlineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Position of a section in plan order
    #[must_use]
    pub fn position(&self, id: SectionId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// First section whose title equals `text` ignoring case
    #[must_use]
    pub fn find_by_title(&self, text: &str) -> Option<&OutlineItem> {
        self.items.iter().find(|item| item.title_matches(text))
    }

    /// Reserve a fresh id
    pub fn allocate_id(&mut self) -> SectionId {
        let id = SectionId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a user section titled "New Section"
    pub fn add_section(&mut self, level: Level) -> SectionId {
        let id = self.allocate_id();
        self.items.push(OutlineItem::new(id, NEW_SECTION_TITLE, level));
        tracing::debug!(%id, %level, "section added");
        id
    }

    /// Insert a new section at `index` (clamped to the end) under a fresh id
    pub fn insert_section(
        &mut self,
        index: usize,
        title: impl Into<String>,
        level: Level,
        status: Status,
        comments: impl Into<String>,
    ) -> SectionId {
        let id = self.allocate_id();
        let item = OutlineItem::new(id, title, level)
            .with_status(status)
            .with_comments(comments);
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        id
    }

    /// Insert a prepared item at `index` (clamped to the end)
    ///
    /// Only ids the outline has not issued yet are accepted; the counter moves
    /// past the inserted id.
    ///
    /// # Errors
    /// - `OutlineError::StaleId` if the id is below `next_id`, live or deleted
    pub fn insert_item(&mut self, index: usize, item: OutlineItem) -> Result<(), OutlineError> {
        if item.id.0 < self.next_id {
            return Err(OutlineError::StaleId {
                id: item.id,
                next_id: SectionId(self.next_id),
            });
        }
        self.next_id = item.id.0 + 1;
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        Ok(())
    }

    /// Remove a user section
    ///
    /// # Errors
    /// - `OutlineError::DeletionDenied` for template sections (plan unchanged)
    /// - `OutlineError::NotFound` for unknown ids
    pub fn delete_section(&mut self, id: SectionId) -> Result<OutlineItem, OutlineError> {
        let index = self.position(id).ok_or(OutlineError::NotFound(id))?;
        if self.items[index].is_default {
            tracing::debug!(%id, "deletion of default section denied");
            return Err(OutlineError::DeletionDenied(id));
        }
        Ok(self.items.remove(index))
    }

    /// Rename a section (both projections)
    ///
    /// # Errors
    /// - `OutlineError::NotFound` for unknown ids
    pub fn rename_section(&mut self, id: SectionId, title: impl Into<String>) -> Result<(), OutlineError> {
        self.item_mut(id)?.title = title.into();
        Ok(())
    }

    /// Change a section's status
    ///
    /// # Errors
    /// - `OutlineError::NotFound` for unknown ids
    pub fn set_status(&mut self, id: SectionId, status: Status) -> Result<(), OutlineError> {
        self.item_mut(id)?.status = status;
        Ok(())
    }

    /// Replace a section's comments
    ///
    /// # Errors
    /// - `OutlineError::NotFound` for unknown ids
    pub fn set_comments(&mut self, id: SectionId, comments: impl Into<String>) -> Result<(), OutlineError> {
        self.item_mut(id)?.comments = comments.into();
        Ok(())
    }

    /// Overwrite a section's derived statistics
    ///
    /// # Errors
    /// - `OutlineError::NotFound` for unknown ids
    pub fn set_stats(&mut self, id: SectionId, stats: SectionStats) -> Result<(), OutlineError> {
        self.item_mut(id)?.stats = stats;
        Ok(())
    }

    /// Overall completion as a percentage in `0.0..=100.0`
    #[must_use]
    pub fn completion(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        let total: u64 = self.items.iter().map(|i| u64::from(i.status.progress())).sum();
        total as f64 / (self.items.len() as f64 * 100.0) * 100.0
    }

    fn item_mut(&mut self, id: SectionId) -> Result<&mut OutlineItem, OutlineError> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(OutlineError::NotFound(id))
    }
}

impl Default for OutlineModel {
    fn default() -> Self {
        Self::new()
    }
}

fn unique_ids(ids: impl Iterator<Item = SectionId>) -> Result<BTreeSet<SectionId>, OutlineError> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(OutlineError::DuplicateId(id));
        }
    }
    Ok(seen)
}
