//! Planner - the controller tying outline, document and store together
//!
//! Plan edits are synchronous and schedule a debounced save. Operations that
//! read or write the document run one at a time: a second request waits for
//! the first to finish.

use crate::builder::{BuildKind, BuildReport, StructureBuilder};
use crate::config::PlannerConfig;
use crate::error::{Operation, PlannerError, StoreError};
use crate::reconcile::{ReconciliationEngine, SyncSummary};
use crate::saver::SaveScheduler;
use crate::statistics::{StatisticsCollector, StatisticsOutcome};
use crate::store::PlanStore;
use docplan_document::{detect_headings, DocumentGateway};
use docplan_outline::{Level, OutlineItem, OutlineModel, SectionId, Status, TocItem};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Why the template was seeded on load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedReason {
    /// Nothing was saved
    NoSavedPlan,
    /// The saved plan had no sections
    EmptySnapshot,
    /// The saved plan could not be parsed or was inconsistent
    Corrupt(String),
}

/// Path taken by [`Planner::load`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The saved plan was restored
    Restored {
        /// Sections restored
        sections: usize,
    },
    /// The default template was seeded
    Seeded {
        /// Why nothing was restored
        reason: SeedReason,
    },
}

/// Plan controller
pub struct Planner {
    config: PlannerConfig,
    outline: Arc<RwLock<OutlineModel>>,
    gateway: Option<Arc<dyn DocumentGateway>>,
    store: Arc<dyn PlanStore>,
    saver: SaveScheduler,
    operations: tokio::sync::Mutex<()>,
    engine: ReconciliationEngine,
    builder: StructureBuilder,
    statistics: StatisticsCollector,
}

impl fmt::Debug for Planner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Planner")
            .field("config", &self.config)
            .field("sections", &self.outline.read().len())
            .field("has_gateway", &self.gateway.is_some())
            .finish_non_exhaustive()
    }
}

impl Planner {
    /// Create a planner over an empty outline with no document host
    ///
    /// Call [`load`](Self::load) to restore or seed the plan.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    #[must_use]
    pub fn new(config: PlannerConfig, store: Arc<dyn PlanStore>) -> Self {
        let outline = Arc::new(RwLock::new(OutlineModel::new()));
        let saver = SaveScheduler::spawn(Arc::clone(&outline), Arc::clone(&store), config.save_debounce());

        Self {
            engine: ReconciliationEngine::new(),
            builder: StructureBuilder::new(&config),
            statistics: StatisticsCollector::new(config.heading_rule),
            config,
            outline,
            gateway: None,
            store,
            saver,
            operations: tokio::sync::Mutex::new(()),
        }
    }

    /// With document host
    #[must_use]
    pub fn with_gateway(mut self, gateway: Arc<dyn DocumentGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Restore the saved plan, or seed the template
    ///
    /// A missing, empty or malformed saved plan seeds the template and
    /// schedules a save of it. Section statistics are then recounted when a
    /// document host is present.
    ///
    /// # Errors
    /// - `PlannerError::HostUnavailable` or `PlannerError::Persistence` when
    ///   the store cannot be read
    pub async fn load(&self) -> Result<LoadOutcome, PlannerError> {
        let restored = match self.store.load().await {
            Ok(Some(snapshot)) if snapshot.is_empty() => Err(SeedReason::EmptySnapshot),
            Ok(Some(snapshot)) => {
                OutlineModel::from_snapshot(snapshot).map_err(|e| SeedReason::Corrupt(e.to_string()))
            }
            Ok(None) => Err(SeedReason::NoSavedPlan),
            Err(StoreError::Parse(reason)) => Err(SeedReason::Corrupt(reason)),
            Err(e) => return Err(PlannerError::store(Operation::Load, e)),
        };

        let outcome = match restored {
            Ok(model) => {
                let sections = model.len();
                *self.outline.write() = model;
                tracing::info!(sections, "plan restored");
                LoadOutcome::Restored { sections }
            }
            Err(reason) => {
                if let SeedReason::Corrupt(detail) = &reason {
                    tracing::warn!(%detail, "saved plan unreadable, seeding template");
                } else {
                    tracing::info!(?reason, "seeding template");
                }
                self.outline.write().seed_template();
                self.saver.touch();
                LoadOutcome::Seeded { reason }
            }
        };

        if let Some(gateway) = self.gateway.clone() {
            let _guard = self.operations.lock().await;
            self.refresh_locked(gateway.as_ref()).await;
        }
        Ok(outcome)
    }

    /// Copy of the current outline
    #[must_use]
    pub fn outline(&self) -> OutlineModel {
        self.outline.read().clone()
    }

    /// TOC projection in plan order
    #[must_use]
    pub fn toc_items(&self) -> Vec<TocItem> {
        self.outline.read().toc_items()
    }

    /// Overall completion percentage
    #[must_use]
    pub fn completion(&self) -> f64 {
        self.outline.read().completion()
    }

    /// Append a "New Section" at `level`
    pub fn add_section(&self, level: Level) -> SectionId {
        let id = self.outline.write().add_section(level);
        self.saver.touch();
        id
    }

    /// Remove a user section
    ///
    /// # Errors
    /// - `PlannerError::Outline` for template sections or unknown ids; the
    ///   plan is unchanged
    pub fn delete_section(&self, id: SectionId) -> Result<OutlineItem, PlannerError> {
        let removed = self.outline.write().delete_section(id)?;
        self.saver.touch();
        Ok(removed)
    }

    /// Rename a section
    ///
    /// # Errors
    /// - `PlannerError::Outline` for unknown ids
    pub fn rename_section(&self, id: SectionId, title: impl Into<String>) -> Result<(), PlannerError> {
        self.outline.write().rename_section(id, title)?;
        self.saver.touch();
        Ok(())
    }

    /// Change a section's status
    ///
    /// # Errors
    /// - `PlannerError::Outline` for unknown ids
    pub fn set_status(&self, id: SectionId, status: Status) -> Result<(), PlannerError> {
        self.outline.write().set_status(id, status)?;
        self.saver.touch();
        Ok(())
    }

    /// Replace a section's comments
    ///
    /// # Errors
    /// - `PlannerError::Outline` for unknown ids
    pub fn set_comments(&self, id: SectionId, comments: impl Into<String>) -> Result<(), PlannerError> {
        self.outline.write().set_comments(id, comments)?;
        self.saver.touch();
        Ok(())
    }

    /// Drop the saved plan and empty the outline (`next_id` back to 1)
    ///
    /// # Errors
    /// - `PlannerError::Persistence` or `PlannerError::HostUnavailable` when
    ///   the store cannot be cleared; the outline is unchanged
    pub async fn delete_all(&self) -> Result<(), PlannerError> {
        self.saver.cancel().await;
        if let Err(e) = self.store.clear().await {
            self.saver.touch();
            return Err(PlannerError::store(Operation::DeleteAll, e));
        }
        self.outline.write().clear();
        tracing::info!("plan data deleted");
        Ok(())
    }

    /// Two-way sync between the plan and the document headings
    ///
    /// # Errors
    /// - `PlannerError::HostUnavailable` without a document host
    /// - `PlannerError::Sync` when reading or flushing fails; the outline is
    ///   unchanged
    pub async fn sync_with_document(&self) -> Result<SyncSummary, PlannerError> {
        let _guard = self.operations.lock().await;
        let gateway = self.gateway(Operation::Sync)?;
        self.sync_locked(gateway.as_ref()).await
    }

    /// Sync, then insert a TOC scaffold of every section in id order
    ///
    /// # Errors
    /// - `PlannerError::HostUnavailable` without a document host
    /// - `PlannerError::Sync` when the sync or the scaffold flush fails
    pub async fn build_toc_scaffold(&self) -> Result<BuildReport, PlannerError> {
        let _guard = self.operations.lock().await;
        let gateway = self.gateway(Operation::BuildToc)?;
        let sync = self.sync_locked(gateway.as_ref()).await?;

        let sections = self.toc_items();
        let batch = self.builder.toc_scaffold(&sections);
        let paragraphs = batch.len();
        gateway
            .flush(batch)
            .await
            .map_err(|e| PlannerError::gateway(Operation::BuildToc, e))?;

        tracing::info!(sections = sections.len(), paragraphs, "TOC scaffold created");
        Ok(BuildReport {
            kind: BuildKind::TocScaffold,
            sections: sections.len(),
            paragraphs,
            sync: Some(sync),
        })
    }

    /// Insert a heading, placeholder and separator for every section
    ///
    /// # Errors
    /// - `PlannerError::HostUnavailable` without a document host
    /// - `PlannerError::Sync` when the flush fails
    pub async fn build_document_structure(&self) -> Result<BuildReport, PlannerError> {
        let _guard = self.operations.lock().await;
        let gateway = self.gateway(Operation::BuildDocument)?;

        let sections = self.toc_items();
        let batch = self.builder.document_structure(&sections);
        let paragraphs = batch.len();
        gateway
            .flush(batch)
            .await
            .map_err(|e| PlannerError::gateway(Operation::BuildDocument, e))?;

        tracing::info!(sections = sections.len(), paragraphs, "document structure built");
        Ok(BuildReport {
            kind: BuildKind::DocumentStructure,
            sections: sections.len(),
            paragraphs,
            sync: None,
        })
    }

    /// Recount per-section statistics from the document
    ///
    /// Without a readable document the outcome is
    /// [`StatisticsOutcome::Unavailable`] and existing statistics stay as they
    /// were.
    pub async fn refresh_statistics(&self) -> StatisticsOutcome {
        let _guard = self.operations.lock().await;
        let Some(gateway) = self.gateway.clone() else {
            return StatisticsOutcome::Unavailable {
                reason: "document host not available".to_string(),
            };
        };
        self.refresh_locked(gateway.as_ref()).await
    }

    /// Whether the document body has no text
    ///
    /// # Errors
    /// - `PlannerError::HostUnavailable` without a document host
    /// - `PlannerError::Sync` when the emptiness check fails
    pub async fn is_document_empty(&self) -> Result<bool, PlannerError> {
        let gateway = self.gateway(Operation::ReadDocument)?;
        gateway
            .is_body_empty()
            .await
            .map_err(|e| PlannerError::gateway(Operation::ReadDocument, e))
    }

    /// Write any pending save now
    ///
    /// # Errors
    /// - `PlannerError::Persistence` or `PlannerError::HostUnavailable` from
    ///   the store
    pub async fn flush_pending(&self) -> Result<(), PlannerError> {
        self.saver
            .flush()
            .await
            .map_err(|e| PlannerError::store(Operation::Save, e))
    }

    /// Failure of the most recent background save, if not yet taken
    #[must_use]
    pub fn take_save_error(&self) -> Option<PlannerError> {
        self.saver
            .take_last_error()
            .map(|e| PlannerError::store(Operation::Save, e))
    }

    /// Write any pending save and stop the save task
    ///
    /// # Errors
    /// - The store failure of the final save
    pub async fn shutdown(&self) -> Result<(), PlannerError> {
        let result = self.saver.shutdown().await;
        tracing::debug!("planner shut down");
        result.map_err(|e| PlannerError::store(Operation::Save, e))
    }

    fn gateway(&self, operation: Operation) -> Result<Arc<dyn DocumentGateway>, PlannerError> {
        self.gateway.clone().ok_or_else(|| {
            tracing::warn!(%operation, "document host not available");
            PlannerError::HostUnavailable { operation }
        })
    }

    /// Reconcile, flush the missing headings, then commit the plan additions
    ///
    /// The plan is committed only after the flush succeeds, and against the
    /// live outline, so edits made while the flush ran are kept.
    async fn sync_locked(&self, gateway: &dyn DocumentGateway) -> Result<SyncSummary, PlannerError> {
        let paragraphs = gateway
            .load_paragraphs()
            .await
            .map_err(|e| PlannerError::gateway(Operation::Sync, e))?;
        let headings = detect_headings(&paragraphs, self.config.heading_rule);

        let planned = {
            let outline = self.outline.read();
            self.engine.reconcile(&outline, &headings)
        };

        let added_to_document = planned.additions_to_document.len();
        if added_to_document > 0 {
            let batch = self.builder.document_additions(&planned.additions_to_document);
            gateway
                .flush(batch)
                .await
                .map_err(|e| PlannerError::gateway(Operation::Sync, e))?;
        }

        let added_to_plan = {
            let mut outline = self.outline.write();
            let committed = self.engine.reconcile(&outline, &headings);
            let added = committed.added_to_plan.len();
            if added > 0 {
                *outline = committed.outline;
            }
            added
        };
        if added_to_plan > 0 {
            self.saver.touch();
        }

        let summary = SyncSummary {
            added_to_plan,
            added_to_document,
        };
        tracing::info!(%summary, "sync finished");

        self.refresh_locked(gateway).await;
        Ok(summary)
    }

    /// Recount statistics; the caller holds the operations lock
    async fn refresh_locked(&self, gateway: &dyn DocumentGateway) -> StatisticsOutcome {
        let paragraphs = match gateway.load_paragraphs().await {
            Ok(paragraphs) => paragraphs,
            Err(e) => {
                tracing::warn!(error = %e, "statistics unavailable");
                return StatisticsOutcome::Unavailable { reason: e.to_string() };
            }
        };

        let segments = self.statistics.segments(&paragraphs);
        let matched = self.statistics.attribute(&mut self.outline.write(), &segments);
        tracing::debug!(segments = segments.len(), matched = matched.len(), "statistics refreshed");

        StatisticsOutcome::Updated {
            segments: segments.len(),
            matched: matched.len(),
        }
    }
}
