//! Error types for Docplan Core
//!
//! Provides error handling for:
//! - Missing document host (degrades to a fallback path)
//! - Failed batched flushes
//! - Plan persistence failures
//! - Malformed persisted plans
//! - Refused outline mutations

use docplan_document::GatewayError;
use docplan_outline::OutlineError;
use std::fmt;

/// User-triggered operations, for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Load the saved plan
    Load,
    /// Persist the plan
    Save,
    /// Delete all saved data
    DeleteAll,
    /// Two-way sync with document headings
    Sync,
    /// Insert a TOC scaffold
    BuildToc,
    /// Insert the full document skeleton
    BuildDocument,
    /// Check or read the document
    ReadDocument,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Load => "load plan",
            Operation::Save => "save plan",
            Operation::DeleteAll => "delete plan data",
            Operation::Sync => "sync with document",
            Operation::BuildToc => "build TOC scaffold",
            Operation::BuildDocument => "build document structure",
            Operation::ReadDocument => "read document",
        };
        f.write_str(name)
    }
}

/// Errors raised by a [`PlanStore`](crate::store::PlanStore)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backing medium is not reachable (no document host)
    #[error("store unavailable: {0}")]
    HostUnavailable(String),

    /// Reading, writing or clearing failed
    #[error("persistence error: {0}")]
    Persistence(String),

    /// The stored plan is not valid JSON of the expected shape
    #[error("malformed plan data: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Main planner error type
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// Document automation is absent
    #[error("{operation} requires the document host, which is not available")]
    HostUnavailable {
        /// Operation that needed the host
        operation: Operation,
    },

    /// A batched flush (or the read preceding it) failed
    #[error("{operation} failed: {source}")]
    Sync {
        /// Operation that was running
        operation: Operation,
        /// Host failure
        #[source]
        source: GatewayError,
    },

    /// Load, save or clear failed
    #[error("{operation} failed: {message}")]
    Persistence {
        /// Operation that was running
        operation: Operation,
        /// Store failure
        message: String,
    },

    /// Persisted plan is malformed
    #[error("malformed plan data: {0}")]
    Parse(String),

    /// Outline mutation refused
    #[error(transparent)]
    Outline(#[from] OutlineError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl PlannerError {
    /// Map a gateway failure raised during `operation`
    #[must_use]
    pub fn gateway(operation: Operation, source: GatewayError) -> Self {
        if source.is_unavailable() {
            Self::HostUnavailable { operation }
        } else {
            Self::Sync { operation, source }
        }
    }

    /// Map a store failure raised during `operation`
    ///
    /// Malformed data only degrades to template seeding on load; during any
    /// other operation it is a persistence failure.
    #[must_use]
    pub fn store(operation: Operation, source: StoreError) -> Self {
        match source {
            StoreError::HostUnavailable(_) => Self::HostUnavailable { operation },
            StoreError::Parse(message) if operation == Operation::Load => Self::Parse(message),
            StoreError::Persistence(message) | StoreError::Parse(message) => {
                Self::Persistence { operation, message }
            }
        }
    }

    /// Whether the condition degrades to a documented fallback instead of failing
    #[inline]
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::HostUnavailable { .. } | Self::Parse(_))
    }

    /// Whether a failed flush left part of a batch in the document
    #[inline]
    #[must_use]
    pub fn partially_applied(&self) -> bool {
        matches!(self, Self::Sync { source, .. } if source.partially_applied())
    }

    /// Dismissible message for the writer
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::HostUnavailable { .. } => {
                "This feature requires the document host, which is not available in this environment."
                    .to_string()
            }
            Self::Sync { operation, .. } => match operation {
                Operation::BuildToc => "Failed to create TOC scaffold. Please try again.".to_string(),
                Operation::BuildDocument => {
                    "Failed to build document structure. Please try again.".to_string()
                }
                _ => "Failed to sync plan with document. Please try again.".to_string(),
            },
            Self::Persistence { operation, .. } => match operation {
                Operation::Load => "Failed to load data. Please try again.".to_string(),
                Operation::DeleteAll => "Failed to delete data. Please try again.".to_string(),
                _ => "Failed to save data. Please try again.".to_string(),
            },
            Self::Parse(_) => {
                "Saved plan data could not be read. The default template was loaded instead."
                    .to_string()
            }
            Self::Outline(OutlineError::DeletionDenied(_)) => {
                "Default sections cannot be deleted.".to_string()
            }
            Self::Outline(err) => err.to_string(),
            Self::Config(msg) => format!("Invalid configuration: {msg}"),
        }
    }
}
