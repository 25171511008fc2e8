//! In-memory plan store

use super::PlanStore;
use crate::error::StoreError;
use async_trait::async_trait;
use docplan_outline::PlanSnapshot;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Holds the plan as a JSON string, the way a property bag would
#[derive(Debug, Default)]
pub struct MemoryPlanStore {
    raw: Mutex<Option<String>>,
    saves: AtomicUsize,
    offline: AtomicBool,
}

impl MemoryPlanStore {
    /// Create an empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `raw` (not validated)
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let store = Self::new();
        *store.raw.lock() = Some(raw.into());
        store
    }

    /// Stored JSON, if any
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.raw.lock().clone()
    }

    /// Number of successful saves
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Report every operation as host-unavailable while set
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::HostUnavailable("memory store offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PlanStore for MemoryPlanStore {
    async fn load(&self) -> Result<Option<PlanSnapshot>, StoreError> {
        self.check_online()?;
        let raw = self.raw.lock().clone();
        raw.map(|json| PlanSnapshot::from_json(&json).map_err(StoreError::from))
            .transpose()
    }

    async fn save(&self, snapshot: &PlanSnapshot) -> Result<(), StoreError> {
        self.check_online()?;
        let json = snapshot.to_json()?;
        *self.raw.lock() = Some(json);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.check_online()?;
        self.raw.lock().take();
        Ok(())
    }
}
