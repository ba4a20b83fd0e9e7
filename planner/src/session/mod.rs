//! Planner session
//!
//! Owns the seating model and its persistence handle. Mutations run to
//! completion synchronously; after each successful one the session emits a
//! snapshot, either to a background [`PersistWorker`] or straight to the
//! store when no worker is attached.
//!
//! Not-found errors mean the caller acted on a stale id. They are logged,
//! returned, and never persisted.

mod worker;

pub use worker::{PersistWorker, RetryPolicy};

use crate::import::{DuplicatePolicy, ImportReport, import_roster};
use crate::model::{SeatingModel, SeatingResult};
use crate::storage::{SnapshotStore, StorageResult};
use shared::models::RoomSettings;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

pub struct PlannerSession {
    model: SeatingModel,
    store: Arc<dyn SnapshotStore>,
    scope: String,
    persist_tx: Option<mpsc::UnboundedSender<shared::LayoutSnapshot>>,
    worker: Option<JoinHandle<()>>,
}

impl PlannerSession {
    /// Load the plan for `scope`, or start an empty one and save it once
    pub fn open(
        store: Arc<dyn SnapshotStore>,
        scope: impl Into<String>,
        default_room: RoomSettings,
    ) -> StorageResult<Self> {
        let scope = scope.into();
        let model = match store.load(&scope)? {
            Some(snapshot) => {
                let model = SeatingModel::from_snapshot(snapshot);
                info!(
                    scope = %scope,
                    tables = model.tables().len(),
                    guests = model.guests().len(),
                    "Seating plan loaded"
                );
                model
            }
            None => {
                let model = SeatingModel::new(default_room);
                store.save(&scope, &model.snapshot())?;
                info!(scope = %scope, "No saved plan, initialized defaults");
                model
            }
        };

        Ok(Self {
            model,
            store,
            scope,
            persist_tx: None,
            worker: None,
        })
    }

    /// Hand persistence to a background worker on the current tokio runtime
    pub fn spawn_persist_worker(&mut self, policy: RetryPolicy) {
        if self.persist_tx.is_some() {
            return;
        }
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = PersistWorker::new(self.store.clone(), self.scope.clone(), policy);
        self.worker = Some(tokio::spawn(worker.run(rx)));
        self.persist_tx = Some(tx);
    }

    pub fn model(&self) -> &SeatingModel {
        &self.model
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Run one mutation and persist the result if it succeeded
    pub fn apply<T>(&mut self, op: impl FnOnce(&mut SeatingModel) -> SeatingResult<T>) -> SeatingResult<T> {
        match op(&mut self.model) {
            Ok(value) => {
                self.persist();
                Ok(value)
            }
            Err(e) if e.is_not_found() => {
                debug!(scope = %self.scope, error = %e, "Stale reference, nothing to do");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Import name lines; persists when at least one guest was added
    pub fn import_roster<I, S>(&mut self, lines: I, policy: DuplicatePolicy) -> ImportReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let report = import_roster(&mut self.model, lines, policy);
        if !report.added.is_empty() {
            self.persist();
        }
        report
    }

    /// Save the current state directly, bypassing the worker
    pub fn flush(&self) -> StorageResult<()> {
        self.store.save(&self.scope, &self.model.snapshot())
    }

    /// Stop the worker after it has written everything queued
    pub async fn shutdown(mut self) {
        self.persist_tx = None;
        if let Some(handle) = self.worker.take()
            && let Err(e) = handle.await
        {
            error!(scope = %self.scope, error = %e, "PersistWorker task failed");
        }
    }

    fn persist(&self) {
        let snapshot = self.model.snapshot();
        match &self.persist_tx {
            Some(tx) => {
                if tx.send(snapshot).is_err() {
                    error!(scope = %self.scope, "PersistWorker gone, saving directly");
                    if let Err(e) = self.flush() {
                        error!(scope = %self.scope, error = %e, "Snapshot save failed");
                    }
                }
            }
            None => {
                if let Err(e) = self.store.save(&self.scope, &snapshot) {
                    error!(scope = %self.scope, error = %e, "Snapshot save failed");
                }
            }
        }
    }
}
