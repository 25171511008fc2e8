//! Docplan Outline - the planning list
//!
//! Holds the writer's table of contents:
//! - Sections with a level, completion status and comments
//! - The TOC projection kept in lock-step with the planning list
//! - Template seeding and default section guidance
//! - Persisted snapshots (statistics never included)
//!
//! # Example
//!
//! ```rust
//! use docplan_outline::{Level, OutlineModel, Status};
//!
//! let mut outline = OutlineModel::with_template();
//! let id = outline.add_section(Level::One);
//! outline.rename_section(id, "Appendix B").unwrap();
//! outline.set_status(id, Status::Drafted).unwrap();
//!
//! assert_eq!(outline.len(), 32);
//! assert!(outline.completion() > 0.0);
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

pub mod error;
pub mod model;
pub mod template;
pub mod types;

pub use error::OutlineError;
pub use model::{OutlineModel, NEW_SECTION_TITLE};
pub use template::{default_comment, template_items, TEMPLATE_LEN};
pub use types::{Level, OutlineItem, PlanSnapshot, SectionId, SectionStats, Status, TocItem};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
