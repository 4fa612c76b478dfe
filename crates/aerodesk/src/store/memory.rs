//! In-memory submission store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{Clock, SubmissionRepository, SystemClock};
use crate::error::{Error, Result};
use crate::submission::{ContactSubmission, NewContact, SubmissionId};

/// A stored record plus its insertion sequence number.
#[derive(Debug, Clone)]
struct Entry {
    seq: u64,
    submission: ContactSubmission,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<SubmissionId, Entry>,
    next_seq: u64,
}

/// Process-lifetime store backed by a `HashMap`.
///
/// Listing orders by `submitted_at` descending and breaks ties with the
/// insertion sequence, so a clock that repeats or steps back slightly still
/// yields newest-inserted first.
#[derive(Debug)]
pub struct InMemorySubmissionStore {
    inner: RwLock<Inner>,
    clock: Arc<dyn Clock>,
    /// Maximum number of submissions. 0 means unlimited.
    max_submissions: usize,
}

impl InMemorySubmissionStore {
    /// Create an empty, unbounded store using the wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty, unbounded store with a custom clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            clock,
            max_submissions: 0,
        }
    }

    /// Limit the number of stored submissions. 0 means unlimited.
    #[must_use]
    pub fn with_capacity_limit(mut self, max_submissions: usize) -> Self {
        self.max_submissions = max_submissions;
        self
    }

    /// The configured capacity, or `None` if unlimited.
    #[must_use]
    pub fn capacity_limit(&self) -> Option<usize> {
        (self.max_submissions > 0).then_some(self.max_submissions)
    }
}

impl Default for InMemorySubmissionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionStore {
    async fn create(&self, contact: NewContact) -> Result<ContactSubmission> {
        let mut inner = self.inner.write().await;

        if let Some(capacity) = self.capacity_limit() {
            if inner.entries.len() >= capacity {
                warn!(capacity, "Rejecting submission, store is full");
                return Err(Error::StoreFull { capacity });
            }
        }

        // v4 collisions are not expected; retry rather than overwrite.
        let mut id = SubmissionId::new_v4();
        while inner.entries.contains_key(&id) {
            id = SubmissionId::new_v4();
        }

        let submission = ContactSubmission::new(id, contact, self.clock.now());
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.entries.insert(
            id,
            Entry {
                seq,
                submission: submission.clone(),
            },
        );

        info!(id = %id, total = inner.entries.len(), "Stored contact submission");
        Ok(submission)
    }

    async fn list(&self) -> Result<Vec<ContactSubmission>> {
        let mut entries: Vec<Entry> = {
            let inner = self.inner.read().await;
            inner.entries.values().cloned().collect()
        };

        entries.sort_by(|a, b| {
            b.submission
                .submitted_at
                .cmp(&a.submission.submitted_at)
                .then_with(|| b.seq.cmp(&a.seq))
        });

        debug!(count = entries.len(), "Listing contact submissions");
        Ok(entries.into_iter().map(|e| e.submission).collect())
    }

    async fn get(&self, id: SubmissionId) -> Result<Option<ContactSubmission>> {
        let inner = self.inner.read().await;
        Ok(inner.entries.get(&id).map(|e| e.submission.clone()))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.inner.read().await.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::{Duration, Utc};

    use super::*;
    use crate::store::ManualClock;

    fn contact(name: &str) -> NewContact {
        NewContact {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            company: None,
            message: "Please send the spec sheet.".to_string(),
        }
    }

    fn manual_store() -> (Arc<ManualClock>, InMemorySubmissionStore) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let store = InMemorySubmissionStore::with_clock(clock.clone());
        (clock, store)
    }

    #[tokio::test]
    async fn test_new_store_is_empty() {
        let store = InMemorySubmissionStore::new();
        assert_eq!(store.count().await.unwrap(), 0);
        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(store.capacity_limit(), None);
    }

    #[tokio::test]
    async fn test_create_then_list_returns_input() {
        let store = InMemorySubmissionStore::new();
        let input = NewContact {
            company: Some("Skyworks".to_string()),
            ..contact("Ada")
        };

        let created = store.create(input.clone()).await.unwrap();
        let listed = store.list().await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], created);
        assert_eq!(listed[0].contact(), input);
    }

    #[tokio::test]
    async fn test_create_stamps_clock_time() {
        let (clock, store) = manual_store();
        let created = store.create(contact("Ada")).await.unwrap();
        assert_eq!(created.submitted_at, clock.now());
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let store = InMemorySubmissionStore::new();
        let mut ids = HashSet::new();
        for i in 0..200 {
            let created = store.create(contact(&format!("User{i}"))).await.unwrap();
            assert!(ids.insert(created.id));
        }
        assert_eq!(store.count().await.unwrap(), 200);
    }

    #[tokio::test]
    async fn test_duplicates_are_not_collapsed() {
        let store = InMemorySubmissionStore::new();
        let a = store.create(contact("Ada")).await.unwrap();
        let b = store.create(contact("Ada")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let (clock, store) = manual_store();
        let t1 = store.create(contact("First")).await.unwrap();
        clock.advance(Duration::seconds(1));
        let t2 = store.create(contact("Second")).await.unwrap();
        clock.advance(Duration::seconds(1));
        let t3 = store.create(contact("Third")).await.unwrap();

        let ids: Vec<SubmissionId> = store.list().await.unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![t3.id, t2.id, t1.id]);
    }

    #[tokio::test]
    async fn test_list_orders_by_timestamp_not_insertion() {
        let (clock, store) = manual_store();
        clock.advance(Duration::seconds(10));
        let later = store.create(contact("Later")).await.unwrap();
        clock.advance(Duration::seconds(-5));
        let earlier = store.create(contact("Earlier")).await.unwrap();

        let ids: Vec<SubmissionId> = store.list().await.unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![later.id, earlier.id]);
    }

    #[tokio::test]
    async fn test_equal_timestamps_list_newest_insert_first() {
        let (_clock, store) = manual_store();
        let a = store.create(contact("A")).await.unwrap();
        let b = store.create(contact("B")).await.unwrap();
        let c = store.create(contact("C")).await.unwrap();
        assert_eq!(a.submitted_at, c.submitted_at);

        let ids: Vec<SubmissionId> = store.list().await.unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);
    }

    #[tokio::test]
    async fn test_list_is_idempotent() {
        let store = InMemorySubmissionStore::new();
        store.create(contact("Ada")).await.unwrap();
        store.create(contact("Grace")).await.unwrap();

        let first = store.list().await.unwrap();
        let second = store.list().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let store = InMemorySubmissionStore::new();
        let created = store.create(contact("Ada")).await.unwrap();

        assert_eq!(store.get(created.id).await.unwrap(), Some(created));
        assert_eq!(store.get(SubmissionId::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_capacity_limit_rejects_when_full() {
        let store = InMemorySubmissionStore::new().with_capacity_limit(2);
        assert_eq!(store.capacity_limit(), Some(2));

        store.create(contact("A")).await.unwrap();
        store.create(contact("B")).await.unwrap();
        let err = store.create(contact("C")).await.unwrap_err();

        assert!(err.is_store_full());
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_zero_capacity_means_unlimited() {
        let store = InMemorySubmissionStore::new().with_capacity_limit(0);
        assert_eq!(store.capacity_limit(), None);
        for i in 0..10 {
            store.create(contact(&format!("U{i}"))).await.unwrap();
        }
        assert_eq!(store.count().await.unwrap(), 10);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates() {
        let store = Arc::new(InMemorySubmissionStore::new());
        let mut handles = Vec::new();
        for i in 0..50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.create(contact(&format!("U{i}"))).await.unwrap()
            }));
        }

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap().id);
        }
        assert_eq!(ids.len(), 50);
        assert_eq!(store.list().await.unwrap().len(), 50);
    }
}
