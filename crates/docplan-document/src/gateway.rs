//! Document gateway trait
//!
//! The narrow surface the planner needs from a rich-document host.

use crate::error::GatewayError;
use crate::paragraph::{InsertBatch, Paragraph};
use async_trait::async_trait;

/// Outcome of a successful flush
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlushReport {
    /// Paragraphs inserted
    pub inserted: usize,
}

/// Access to the live document
///
/// Implementations wrap a host automation API. Every call may suspend until
/// the host round-trip completes.
#[async_trait]
pub trait DocumentGateway: Send + Sync {
    /// Read every paragraph of the body in document order
    async fn load_paragraphs(&self) -> Result<Vec<Paragraph>, GatewayError>;

    /// Whether the body has no text beyond whitespace
    async fn is_body_empty(&self) -> Result<bool, GatewayError>;

    /// Apply every queued insertion in order, as one host round-trip
    ///
    /// A failure may leave a prefix of the batch applied; there is no
    /// rollback.
    async fn flush(&self, batch: InsertBatch) -> Result<FlushReport, GatewayError>;
}
