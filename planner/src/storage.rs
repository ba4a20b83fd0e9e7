//! redb-based snapshot storage
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `layouts` | `scope` | `LayoutSnapshot` (JSON) | Latest plan per scope |
//!
//! A scope is one seating plan (one event). The planner only ever reads the
//! latest snapshot and overwrites it on save; there is no history.
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate`: a snapshot is on disk as soon as
//! `save` returns, and the file is always in a consistent state.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::LayoutSnapshot;
use shared::error::{AppError, ErrorCode};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// key = scope, value = JSON-serialized LayoutSnapshot
const LAYOUTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("layouts");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        let code = match &err {
            StorageError::Serialization(_) => ErrorCode::StorageCorrupted,
            StorageError::Unavailable(_) => ErrorCode::SystemBusy,
            _ => ErrorCode::DatabaseError,
        };
        AppError::with_message(code, err.to_string())
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence collaborator for seating plans
///
/// `load` returns `Ok(None)` when the scope has never been saved.
pub trait SnapshotStore: Send + Sync {
    fn load(&self, scope: &str) -> StorageResult<Option<LayoutSnapshot>>;

    fn save(&self, scope: &str, snapshot: &LayoutSnapshot) -> StorageResult<()>;
}

/// Snapshot store backed by redb
#[derive(Clone)]
pub struct RedbSnapshotStore {
    db: Arc<Database>,
}

impl RedbSnapshotStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// In-memory database for tests
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(LAYOUTS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Remove a scope; returns whether it existed
    pub fn delete(&self, scope: &str) -> StorageResult<bool> {
        let txn = self.db.begin_write()?;
        let existed = {
            let mut table = txn.open_table(LAYOUTS_TABLE)?;
            let removed = table.remove(scope)?;
            removed.is_some()
        };
        txn.commit()?;
        Ok(existed)
    }

    /// All saved scopes, in key order
    pub fn scopes(&self) -> StorageResult<Vec<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LAYOUTS_TABLE)?;

        let mut scopes = Vec::new();
        for result in table.iter()? {
            let (key, _) = result?;
            scopes.push(key.value().to_string());
        }
        Ok(scopes)
    }
}

impl SnapshotStore for RedbSnapshotStore {
    fn load(&self, scope: &str) -> StorageResult<Option<LayoutSnapshot>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LAYOUTS_TABLE)?;

        match table.get(scope)? {
            Some(value) => {
                let snapshot: LayoutSnapshot = serde_json::from_slice(value.value())?;
                Ok(Some(snapshot))
            }
            None => Ok(None),
        }
    }

    fn save(&self, scope: &str, snapshot: &LayoutSnapshot) -> StorageResult<()> {
        let value = serde_json::to_vec(snapshot)?;
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(LAYOUTS_TABLE)?;
            table.insert(scope, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Arc<S> {
    fn load(&self, scope: &str) -> StorageResult<Option<LayoutSnapshot>> {
        (**self).load(scope)
    }

    fn save(&self, scope: &str, snapshot: &LayoutSnapshot) -> StorageResult<()> {
        (**self).save(scope, snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Guest, RoomSettings};

    #[test]
    fn test_load_missing_scope() {
        let store = RedbSnapshotStore::open_in_memory().unwrap();
        assert!(store.load("wedding").unwrap().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let store = RedbSnapshotStore::open_in_memory().unwrap();
        let mut snapshot = LayoutSnapshot::empty(RoomSettings::default());
        snapshot.guests.push(Guest::new(1, "Alice"));
        snapshot.update_checksum();

        store.save("wedding", &snapshot).unwrap();
        let loaded = store.load("wedding").unwrap().unwrap();
        assert_eq!(loaded, snapshot);
        assert!(loaded.verify_checksum());

        // Overwrite keeps a single entry
        snapshot.guests.push(Guest::new(2, "Bob"));
        store.save("wedding", &snapshot).unwrap();
        assert_eq!(store.load("wedding").unwrap().unwrap().guests.len(), 2);
        assert_eq!(store.scopes().unwrap(), vec!["wedding".to_string()]);
    }

    #[test]
    fn test_scopes_are_independent() {
        let store = RedbSnapshotStore::open_in_memory().unwrap();
        store.save("a", &LayoutSnapshot::default()).unwrap();
        store.save("b", &LayoutSnapshot::default()).unwrap();
        assert_eq!(store.scopes().unwrap(), vec!["a".to_string(), "b".to_string()]);

        assert!(store.delete("a").unwrap());
        assert!(!store.delete("a").unwrap());
        assert!(store.load("a").unwrap().is_none());
        assert!(store.load("b").unwrap().is_some());
    }

    #[test]
    fn test_file_backed_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layouts.redb");
        {
            let store = RedbSnapshotStore::open(&path).unwrap();
            store.save("wedding", &LayoutSnapshot::default()).unwrap();
        }
        let store = RedbSnapshotStore::open(&path).unwrap();
        assert!(store.load("wedding").unwrap().is_some());
    }

    #[test]
    fn test_corrupt_value_is_serialization_error() {
        let store = RedbSnapshotStore::open_in_memory().unwrap();
        let txn = store.db.begin_write().unwrap();
        {
            let mut table = txn.open_table(LAYOUTS_TABLE).unwrap();
            table.insert("wedding", b"not json".as_slice()).unwrap();
        }
        txn.commit().unwrap();

        let err = store.load("wedding").unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::StorageCorrupted);
    }
}
