//! Docplan Document - the host document boundary
//!
//! The planner never talks to a document host directly. It goes through
//! [`DocumentGateway`], which offers three things:
//!
//! - **Read**: every paragraph with its style name
//! - **Emptiness check**: whether the body is empty
//! - **Flush**: apply an [`InsertBatch`] of formatted paragraphs in one round-trip
//!
//! Heading detection lives here too, so every consumer classifies styles
//! through the same [`HeadingRule`].

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod gateway;
pub mod heading;
pub mod paragraph;

pub use error::GatewayError;
pub use gateway::{DocumentGateway, FlushReport};
pub use heading::{detect_headings, DocumentHeading, HeadingRule};
pub use paragraph::{
    BuiltInStyle, InsertBatch, InsertPosition, Paragraph, ParagraphFormat, ParagraphHandle,
    QueuedParagraph,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
