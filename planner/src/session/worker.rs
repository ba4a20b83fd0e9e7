//! Persist Worker - saves layout snapshots in the background
//!
//! Receives snapshots over an mpsc channel after each successful mutation.
//! Only the newest queued snapshot is written: older ones are superseded.
//! Failed saves retry with exponential backoff; a save that keeps failing is
//! logged and dropped. The in-memory model is never rolled back.
//!
//! Note: redb operations are synchronous for stability.

use crate::storage::SnapshotStore;
use shared::LayoutSnapshot;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const RETRY_MAX_DELAY_MS: u64 = 5_000;

/// Retry settings for failed saves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_millis(RETRY_MAX_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    /// Exponential backoff: delay = base * 2^attempt, capped at max
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Background writer for one scope
pub struct PersistWorker {
    store: Arc<dyn SnapshotStore>,
    scope: String,
    policy: RetryPolicy,
}

impl PersistWorker {
    pub fn new(store: Arc<dyn SnapshotStore>, scope: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            store,
            scope: scope.into(),
            policy,
        }
    }

    /// Run until the sending side is dropped, then drain and exit
    pub async fn run(self, mut rx: mpsc::UnboundedReceiver<LayoutSnapshot>) {
        tracing::info!(scope = %self.scope, "PersistWorker started");

        while let Some(mut snapshot) = rx.recv().await {
            // Coalesce: anything already queued is newer
            let mut superseded = 0usize;
            while let Ok(newer) = rx.try_recv() {
                snapshot = newer;
                superseded += 1;
            }
            if superseded > 0 {
                tracing::debug!(scope = %self.scope, superseded, "Coalesced queued snapshots");
            }
            self.save_with_retry(&snapshot).await;
        }

        tracing::info!(scope = %self.scope, "Persist channel closed, shutting down PersistWorker");
    }

    /// Returns whether the snapshot was eventually written
    async fn save_with_retry(&self, snapshot: &LayoutSnapshot) -> bool {
        let mut attempt = 0u32;
        loop {
            match self.store.save(&self.scope, snapshot) {
                Ok(()) => {
                    tracing::debug!(
                        scope = %self.scope,
                        attempt,
                        guests = snapshot.guests.len(),
                        tables = snapshot.tables.len(),
                        "Snapshot saved"
                    );
                    return true;
                }
                Err(e) if attempt < self.policy.max_retries => {
                    let delay = self.policy.delay_for(attempt);
                    tracing::warn!(
                        scope = %self.scope,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Snapshot save failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!(
                        scope = %self.scope,
                        attempts = attempt + 1,
                        error = %e,
                        "Snapshot save failed, giving up until the next change"
                    );
                    return false;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{StorageError, StorageResult};
    use shared::models::Guest;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails the first `fail_first` saves, then records
    #[derive(Default)]
    struct FlakyStore {
        fail_first: u32,
        attempts: AtomicU32,
        saved: Mutex<Vec<LayoutSnapshot>>,
    }

    impl FlakyStore {
        fn failing(fail_first: u32) -> Self {
            Self {
                fail_first,
                ..Default::default()
            }
        }
    }

    impl SnapshotStore for FlakyStore {
        fn load(&self, _scope: &str) -> StorageResult<Option<LayoutSnapshot>> {
            Ok(self.saved.lock().unwrap().last().cloned())
        }

        fn save(&self, _scope: &str, snapshot: &LayoutSnapshot) -> StorageResult<()> {
            let n = self.attempts.fetch_add(1, Ordering::SeqCst);
            if n < self.fail_first {
                return Err(StorageError::Unavailable("disk busy".into()));
            }
            self.saved.lock().unwrap().push(snapshot.clone());
            Ok(())
        }
    }

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(4),
        }
    }

    fn snapshot_with(n: usize) -> LayoutSnapshot {
        let mut s = LayoutSnapshot::default();
        for i in 0..n {
            s.guests.push(Guest::new(i as i64 + 1, format!("Guest {i}")));
        }
        s.update_checksum();
        s
    }

    #[test]
    fn test_backoff_is_capped() {
        let policy = RetryPolicy {
            max_retries: 10,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(1000),
        };
        assert_eq!(policy.delay_for(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(400));
        assert_eq!(policy.delay_for(8), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(40), Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_coalesces_to_newest() {
        let store = Arc::new(FlakyStore::default());
        let (tx, rx) = mpsc::unbounded_channel();
        for n in 1..=3 {
            tx.send(snapshot_with(n)).unwrap();
        }
        drop(tx);

        PersistWorker::new(store.clone(), "wedding", fast_policy(0))
            .run(rx)
            .await;

        let saved = store.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].guests.len(), 3);
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let store = Arc::new(FlakyStore::failing(2));
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(snapshot_with(1)).unwrap();
        drop(tx);

        PersistWorker::new(store.clone(), "wedding", fast_policy(3))
            .run(rx)
            .await;

        assert_eq!(store.attempts.load(Ordering::SeqCst), 3);
        assert_eq!(store.saved.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let store = Arc::new(FlakyStore::failing(u32::MAX));
        let worker = PersistWorker::new(store.clone(), "wedding", fast_policy(2));

        assert!(!worker.save_with_retry(&snapshot_with(1)).await);
        assert_eq!(store.attempts.load(Ordering::SeqCst), 3);
        assert!(store.saved.lock().unwrap().is_empty());
    }
}
