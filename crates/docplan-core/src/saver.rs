//! Debounced plan persistence
//!
//! A background task owns the write side of the store. Every mutation
//! touches it; the save runs once the quiet period elapses and reads the
//! outline at that moment, so a burst of edits produces one write of the
//! latest state.

use crate::error::StoreError;
use crate::store::PlanStore;
use docplan_outline::OutlineModel;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Messages accepted by the save task
#[derive(Debug)]
enum SaveCommand {
    /// The outline changed; restart the quiet period
    Touch,
    /// Drop any pending save
    Cancel(oneshot::Sender<()>),
    /// Write a pending save now
    Flush(oneshot::Sender<Result<(), StoreError>>),
    /// Write a pending save, then stop
    Shutdown(oneshot::Sender<Result<(), StoreError>>),
}

enum Event {
    Command(Option<SaveCommand>),
    Elapsed,
}

/// Handle to the background save task
#[derive(Debug)]
pub struct SaveScheduler {
    sender: mpsc::UnboundedSender<SaveCommand>,
    task: Mutex<Option<JoinHandle<()>>>,
    last_error: Arc<Mutex<Option<StoreError>>>,
}

impl SaveScheduler {
    /// Spawn the save task
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    #[must_use]
    pub fn spawn(
        outline: Arc<RwLock<OutlineModel>>,
        store: Arc<dyn PlanStore>,
        debounce: Duration,
    ) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let last_error = Arc::new(Mutex::new(None));
        let task = tokio::spawn(save_task(
            receiver,
            outline,
            store,
            debounce,
            Arc::clone(&last_error),
        ));

        Self {
            sender,
            task: Mutex::new(Some(task)),
            last_error,
        }
    }

    /// Schedule a save after the quiet period
    pub fn touch(&self) {
        if self.sender.send(SaveCommand::Touch).is_err() {
            tracing::debug!("save task stopped, change not scheduled");
        }
    }

    /// Drop any pending save; returns once no save is running
    pub async fn cancel(&self) {
        let (ack, done) = oneshot::channel();
        if self.sender.send(SaveCommand::Cancel(ack)).is_ok() {
            let _ = done.await;
        }
    }

    /// Write a pending save immediately
    ///
    /// # Errors
    /// - The store failure of the forced save
    pub async fn flush(&self) -> Result<(), StoreError> {
        let (reply, result) = oneshot::channel();
        if self.sender.send(SaveCommand::Flush(reply)).is_err() {
            return Ok(());
        }
        result.await.unwrap_or(Ok(()))
    }

    /// Write a pending save and stop the task
    ///
    /// # Errors
    /// - The store failure of the final save
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        let (reply, result) = oneshot::channel();
        let outcome = if self.sender.send(SaveCommand::Shutdown(reply)).is_ok() {
            result.await.unwrap_or(Ok(()))
        } else {
            Ok(())
        };

        let task = self.task.lock().take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "save task ended abnormally");
            }
        }
        outcome
    }

    /// Failure of the most recent background save, if not yet taken
    #[must_use]
    pub fn take_last_error(&self) -> Option<StoreError> {
        self.last_error.lock().take()
    }
}

async fn save_task(
    mut receiver: mpsc::UnboundedReceiver<SaveCommand>,
    outline: Arc<RwLock<OutlineModel>>,
    store: Arc<dyn PlanStore>,
    debounce: Duration,
    last_error: Arc<Mutex<Option<StoreError>>>,
) {
    let mut pending = false;
    loop {
        let event = if pending {
            tokio::select! {
                command = receiver.recv() => Event::Command(command),
                () = tokio::time::sleep(debounce) => Event::Elapsed,
            }
        } else {
            Event::Command(receiver.recv().await)
        };

        match event {
            Event::Elapsed => {
                pending = false;
                let _ = save_now(&outline, store.as_ref(), &last_error).await;
            }
            Event::Command(Some(SaveCommand::Touch)) => pending = true,
            Event::Command(Some(SaveCommand::Cancel(ack))) => {
                pending = false;
                let _ = ack.send(());
            }
            Event::Command(Some(SaveCommand::Flush(reply))) => {
                let result = if pending {
                    save_now(&outline, store.as_ref(), &last_error).await
                } else {
                    Ok(())
                };
                pending = false;
                let _ = reply.send(result);
            }
            Event::Command(Some(SaveCommand::Shutdown(reply))) => {
                let result = if pending {
                    save_now(&outline, store.as_ref(), &last_error).await
                } else {
                    Ok(())
                };
                let _ = reply.send(result);
                break;
            }
            Event::Command(None) => {
                if pending {
                    let _ = save_now(&outline, store.as_ref(), &last_error).await;
                }
                break;
            }
        }
    }
    tracing::debug!("save task stopped");
}

async fn save_now(
    outline: &RwLock<OutlineModel>,
    store: &dyn PlanStore,
    last_error: &Mutex<Option<StoreError>>,
) -> Result<(), StoreError> {
    let snapshot = outline.read().snapshot();
    let result = store.save(&snapshot).await;
    match &result {
        Ok(()) => tracing::debug!(sections = snapshot.planning_items.len(), "plan saved"),
        Err(e) => {
            tracing::warn!(error = %e, "plan save failed");
            *last_error.lock() = Some(e.clone());
        }
    }
    result
}
