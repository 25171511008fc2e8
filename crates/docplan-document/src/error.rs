//! Error types for document access

/// Errors raised by a [`DocumentGateway`](crate::DocumentGateway)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// Document automation is not available (running outside the host)
    #[error("document host unavailable: {0}")]
    HostUnavailable(String),

    /// A batched flush was rejected by the host
    #[error("flush failed after {applied} of {queued} paragraphs: {message}")]
    Sync {
        /// Host-supplied reason
        message: String,
        /// Paragraphs queued in the batch
        queued: usize,
        /// Paragraphs the host applied before failing
        applied: usize,
    },

    /// Reading the document body failed
    #[error("failed to read document: {0}")]
    Read(String),
}

impl GatewayError {
    /// Create a flush failure
    pub fn sync(message: impl Into<String>, queued: usize, applied: usize) -> Self {
        Self::Sync {
            message: message.into(),
            queued,
            applied,
        }
    }

    /// Whether the host itself is missing
    #[inline]
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::HostUnavailable(_))
    }

    /// Whether a failed flush left some paragraphs in the document
    #[inline]
    #[must_use]
    pub fn partially_applied(&self) -> bool {
        matches!(self, Self::Sync { applied, .. } if *applied > 0)
    }
}
