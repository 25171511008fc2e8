//! Plan persistence
//!
//! The planner saves its snapshot through [`PlanStore`]. Where the bytes go
//! is the store's business:
//! - [`MemoryPlanStore`]: a JSON string held in memory
//! - [`FilePlanStore`]: a JSON property bag on disk, keyed by property name
//! - [`FallbackPlanStore`]: a primary store that switches to a local one when
//!   the document host is unavailable

pub mod fallback;
pub mod file;
pub mod memory;

pub use fallback::{FallbackPlanStore, PersistenceBackend};
pub use file::FilePlanStore;
pub use memory::MemoryPlanStore;

use crate::error::StoreError;
use async_trait::async_trait;
use docplan_outline::PlanSnapshot;

/// Key-value persistence for a plan snapshot
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Load the saved snapshot, `None` when nothing was saved
    async fn load(&self) -> Result<Option<PlanSnapshot>, StoreError>;

    /// Overwrite the saved snapshot
    async fn save(&self, snapshot: &PlanSnapshot) -> Result<(), StoreError>;

    /// Remove the saved snapshot
    async fn clear(&self) -> Result<(), StoreError>;
}
