//! Primary store with an explicit local fallback
//!
//! When the primary store reports that the document host is unavailable,
//! the operation is retried on the local store and the switch is recorded,
//! so callers can tell which medium holds the plan.

use super::PlanStore;
use crate::error::StoreError;
use async_trait::async_trait;
use docplan_outline::PlanSnapshot;
use parking_lot::Mutex;

/// Medium the last operation used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersistenceBackend {
    /// The document's own property bag
    Document,
    /// Local fallback storage
    LocalFallback,
}

/// Store that degrades to a local store without a document host
#[derive(Debug)]
pub struct FallbackPlanStore<P, L> {
    primary: P,
    local: L,
    backend: Mutex<PersistenceBackend>,
}

impl<P: PlanStore, L: PlanStore> FallbackPlanStore<P, L> {
    /// Create a fallback pair
    #[must_use]
    pub fn new(primary: P, local: L) -> Self {
        Self {
            primary,
            local,
            backend: Mutex::new(PersistenceBackend::Document),
        }
    }

    /// Medium used by the most recent operation
    #[must_use]
    pub fn backend(&self) -> PersistenceBackend {
        *self.backend.lock()
    }

    /// Primary store
    #[inline]
    #[must_use]
    pub fn primary(&self) -> &P {
        &self.primary
    }

    /// Local store
    #[inline]
    #[must_use]
    pub fn local(&self) -> &L {
        &self.local
    }

    fn record(&self, backend: PersistenceBackend, operation: &str) {
        let mut current = self.backend.lock();
        if *current != backend {
            match backend {
                PersistenceBackend::LocalFallback => {
                    tracing::warn!(operation, "document host unavailable, using local plan storage");
                }
                PersistenceBackend::Document => {
                    tracing::info!(operation, "document host available again");
                }
            }
            *current = backend;
        }
    }
}

#[async_trait]
impl<P: PlanStore, L: PlanStore> PlanStore for FallbackPlanStore<P, L> {
    async fn load(&self) -> Result<Option<PlanSnapshot>, StoreError> {
        match self.primary.load().await {
            Err(StoreError::HostUnavailable(_)) => {
                self.record(PersistenceBackend::LocalFallback, "load");
                self.local.load().await
            }
            other => {
                self.record(PersistenceBackend::Document, "load");
                other
            }
        }
    }

    async fn save(&self, snapshot: &PlanSnapshot) -> Result<(), StoreError> {
        match self.primary.save(snapshot).await {
            Err(StoreError::HostUnavailable(_)) => {
                self.record(PersistenceBackend::LocalFallback, "save");
                self.local.save(snapshot).await
            }
            other => {
                self.record(PersistenceBackend::Document, "save");
                other
            }
        }
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match self.primary.clear().await {
            Err(StoreError::HostUnavailable(_)) => {
                self.record(PersistenceBackend::LocalFallback, "clear");
                self.local.clear().await
            }
            other => {
                self.record(PersistenceBackend::Document, "clear");
                other
            }
        }
    }
}
