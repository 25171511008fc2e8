//! Docplan Core - the document planner
//!
//! Keeps a writer's outline and the document's real headings in step:
//! - Two-way, add-only reconciliation between plan and document
//! - TOC scaffold and document skeleton generation, one flush per build
//! - Per-section statistics attributed by heading proximity
//! - Debounced persistence through a pluggable [`PlanStore`]
//!
//! # Example
//!
//! ```rust,ignore
//! use docplan_core::{FilePlanStore, Planner, PlannerConfig};
//! use std::sync::Arc;
//!
//! # async fn example(gateway: Arc<dyn docplan_document::DocumentGateway>) -> Result<(), docplan_core::PlannerError> {
//! let config = PlannerConfig::new();
//! let store = Arc::new(FilePlanStore::new("properties.json", &config.property_key));
//! let planner = Planner::new(config, store).with_gateway(gateway);
//!
//! planner.load().await?;
//! let summary = planner.sync_with_document().await?;
//! println!("{summary}");
//!
//! planner.shutdown().await?;
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

pub mod builder;
pub mod config;
pub mod error;
pub mod planner;
pub mod reconcile;
pub mod saver;
pub mod statistics;
pub mod store;
pub mod telemetry;

pub use builder::{BuildKind, BuildReport, StructureBuilder, PLACEHOLDER_COLOR};
pub use config::{PlannerConfig, DEFAULT_PLACEHOLDER, DEFAULT_PROPERTY_KEY, DEFAULT_TOC_TITLE};
pub use error::{Operation, PlannerError, StoreError};
pub use planner::{LoadOutcome, Planner, SeedReason};
pub use reconcile::{Reconciliation, ReconciliationEngine, SyncSummary};
pub use saver::SaveScheduler;
pub use statistics::{SegmentStats, StatisticsCollector, StatisticsOutcome};
pub use store::{FallbackPlanStore, FilePlanStore, MemoryPlanStore, PersistenceBackend, PlanStore};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with Docplan Core
    pub use crate::{
        LoadOutcome, PlanStore, Planner, PlannerConfig, PlannerError, StatisticsOutcome,
        SyncSummary,
    };
    pub use docplan_document::{DocumentGateway, HeadingRule};
    pub use docplan_outline::{Level, OutlineModel, SectionId, Status};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
