//! Store wrappers that inject the races the registrars must absorb.

use std::sync::atomic::{AtomicU32, Ordering};

use drs_store::{InMemoryObjectStore, ObjectStore, ReplaceOutcome, StoreError, StoreResult};
use drs_types::{AccessMethod, DrsObject};

/// Wraps an [`InMemoryObjectStore`], failing the first `insert_conflicts`
/// inserts with a duplicate key and the first `push_conflicts` pushes with a
/// zero count, as if another client had won the race each time.
#[derive(Debug, Default)]
pub struct RacingStore {
    pub inner: InMemoryObjectStore,
    insert_conflicts: AtomicU32,
    push_conflicts: AtomicU32,
    pub inserts: AtomicU32,
    pub pushes: AtomicU32,
}

impl RacingStore {
    pub fn new(insert_conflicts: u32, push_conflicts: u32) -> Self {
        Self {
            insert_conflicts: AtomicU32::new(insert_conflicts),
            push_conflicts: AtomicU32::new(push_conflicts),
            ..Default::default()
        }
    }

    fn take(counter: &AtomicU32) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

impl ObjectStore for RacingStore {
    fn find(&self, id: &str) -> StoreResult<Option<DrsObject>> {
        self.inner.find(id)
    }

    fn insert(&self, object: &DrsObject) -> StoreResult<()> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        if Self::take(&self.insert_conflicts) {
            return Err(StoreError::DuplicateKey(object.id.clone()));
        }
        self.inner.insert(object)
    }

    fn replace(&self, object: &DrsObject, upsert: bool) -> StoreResult<ReplaceOutcome> {
        self.inner.replace(object, upsert)
    }

    fn set_access_method(&self, object_id: &str, method: &AccessMethod) -> StoreResult<u64> {
        self.inner.set_access_method(object_id, method)
    }

    fn push_access_method(&self, object_id: &str, method: &AccessMethod) -> StoreResult<u64> {
        self.pushes.fetch_add(1, Ordering::SeqCst);
        if Self::take(&self.push_conflicts) {
            return Ok(0);
        }
        self.inner.push_access_method(object_id, method)
    }

    fn pull_access_method(&self, object_id: &str, access_id: &str) -> StoreResult<u64> {
        self.inner.pull_access_method(object_id, access_id)
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        self.inner.delete(id)
    }
}

/// A store whose every call fails, for checking error propagation.
#[derive(Debug, Default)]
pub struct BrokenStore;

impl ObjectStore for BrokenStore {
    fn find(&self, _id: &str) -> StoreResult<Option<DrsObject>> {
        Err(StoreError::Backend("offline".into()))
    }

    fn insert(&self, _object: &DrsObject) -> StoreResult<()> {
        Err(StoreError::Backend("offline".into()))
    }

    fn replace(&self, _object: &DrsObject, _upsert: bool) -> StoreResult<ReplaceOutcome> {
        Err(StoreError::Backend("offline".into()))
    }

    fn set_access_method(&self, _object_id: &str, _method: &AccessMethod) -> StoreResult<u64> {
        Err(StoreError::Backend("offline".into()))
    }

    fn push_access_method(&self, _object_id: &str, _method: &AccessMethod) -> StoreResult<u64> {
        Err(StoreError::Backend("offline".into()))
    }

    fn pull_access_method(&self, _object_id: &str, _access_id: &str) -> StoreResult<u64> {
        Err(StoreError::Backend("offline".into()))
    }

    fn delete(&self, _id: &str) -> StoreResult<bool> {
        Err(StoreError::Backend("offline".into()))
    }
}

/// Seed `store` with an object carrying the given access ids.
pub fn seed(store: &dyn ObjectStore, id: &str, access_ids: &[&str]) -> DrsObject {
    let mut obj = DrsObject::with_access_methods(
        access_ids
            .iter()
            .map(|a| AccessMethod::new("https", format!("https://host/{id}/{a}")).with_access_id(*a))
            .collect(),
    )
    .with_field("name", id);
    obj.id = id.to_string();
    store.insert(&obj).expect("seed insert");
    obj
}
