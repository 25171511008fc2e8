//! Error types for the outline model

use crate::types::SectionId;

/// Outline mutation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutlineError {
    /// Template-seeded sections cannot be removed
    #[error("section {0} is a default section and cannot be deleted")]
    DeletionDenied(SectionId),

    /// No section carries the given id
    #[error("section not found: {0}")]
    NotFound(SectionId),

    /// Snapshot lists disagree on which sections exist
    #[error("snapshot out of lock-step: toc ids {toc:?}, planning ids {planning:?}")]
    LockStepViolation {
        /// Ids present in the TOC list
        toc: Vec<SectionId>,
        /// Ids present in the planning list
        planning: Vec<SectionId>,
    },

    /// The same id appears twice in a snapshot
    #[error("duplicate section id: {0}")]
    DuplicateId(SectionId),

    /// The id was already issued by this outline
    #[error("section id {id} was already issued (next id {next_id})")]
    StaleId {
        /// Rejected id
        id: SectionId,
        /// Next id the outline would allocate
        next_id: SectionId,
    },
}

impl OutlineError {
    /// Whether the error is a refused deletion
    #[inline]
    #[must_use]
    pub fn is_denial(&self) -> bool {
        matches!(self, Self::DeletionDenied(_))
    }
}
