use drs_types::{AccessMethod, DrsObject, ServiceInfo};

use crate::error::StoreResult;

/// What a whole-document replace actually did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// An existing document was overwritten.
    Replaced,
    /// No document matched and a new one was inserted.
    Upserted,
    /// No document matched and upsert was not requested.
    NoMatch,
}

/// Collection of [`DrsObject`] documents keyed by their unique `id`.
///
/// All implementations must satisfy these invariants:
/// - `id` is unique; `insert` never overwrites.
/// - Each method is atomic with respect to every other method on the same
///   object. Counts returned by the conditional updates reflect what matched
///   inside that atomic section.
/// - Elements of `access_methods` are matched on `access_id` only.
pub trait ObjectStore: Send + Sync {
    /// Fetch an object by `id`.
    ///
    /// Returns `Ok(None)` if the object does not exist.
    fn find(&self, id: &str) -> StoreResult<Option<DrsObject>>;

    /// Insert a new object.
    ///
    /// Fails with [`StoreError::DuplicateKey`](crate::StoreError::DuplicateKey)
    /// if an object with the same `id` is already stored.
    fn insert(&self, object: &DrsObject) -> StoreResult<()>;

    /// Replace the object with the same `id` as `object`, inserting it when
    /// absent and `upsert` is set.
    fn replace(&self, object: &DrsObject, upsert: bool) -> StoreResult<ReplaceOutcome>;

    /// Overwrite every element of `object_id`'s access methods whose
    /// `access_id` equals `method.access_id`.
    ///
    /// Returns the number of elements matched (0 if the object or element is
    /// absent). Matching, not byte-level change, is counted, so rewriting an
    /// element with identical content still reports 1.
    fn set_access_method(&self, object_id: &str, method: &AccessMethod) -> StoreResult<u64>;

    /// Append `method` to `object_id`'s access methods unless an element with
    /// the same `access_id` already exists.
    ///
    /// Returns 1 if appended, 0 if the object is absent or the guard rejected it.
    fn push_access_method(&self, object_id: &str, method: &AccessMethod) -> StoreResult<u64>;

    /// Remove every element of `object_id`'s access methods carrying `access_id`.
    ///
    /// Returns the number of elements removed.
    fn pull_access_method(&self, object_id: &str, access_id: &str) -> StoreResult<u64>;

    /// Delete an object by `id`. Returns `true` if the object existed.
    fn delete(&self, id: &str) -> StoreResult<bool>;

    /// Check whether an object exists.
    ///
    /// Default implementation calls `find()`. Backends may override with a
    /// cheaper existence probe.
    fn exists(&self, id: &str) -> StoreResult<bool> {
        Ok(self.find(id)?.is_some())
    }
}

/// Singleton collection holding the [`ServiceInfo`] document.
pub trait ServiceInfoStore: Send + Sync {
    /// The current service-info document, if one has been stored.
    fn find(&self) -> StoreResult<Option<ServiceInfo>>;

    /// Insert the document, or replace the existing one wholesale.
    fn upsert(&self, info: &ServiceInfo) -> StoreResult<ReplaceOutcome>;
}
