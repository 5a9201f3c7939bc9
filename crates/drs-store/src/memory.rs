use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use drs_types::{AccessMethod, DrsObject, ServiceInfo};

use crate::error::{StoreError, StoreResult};
use crate::traits::{ObjectStore, ReplaceOutcome, ServiceInfoStore};

fn poisoned<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::Poisoned(e.to_string())
}

/// In-memory, HashMap-based object store.
///
/// All objects are held behind a single `RwLock`. Every mutation runs under
/// the write lock, which is what makes the conditional access-method updates
/// atomic. Objects are cloned on read/write.
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<String, DrsObject>>,
}

impl InMemoryObjectStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    fn read_map(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<String, DrsObject>>> {
        self.objects.read().map_err(poisoned)
    }

    fn write_map(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<String, DrsObject>>> {
        self.objects.write().map_err(poisoned)
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read_map()?.len())
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read_map()?.is_empty())
    }

    /// Return a sorted list of all object ids in the store.
    pub fn ids(&self) -> StoreResult<Vec<String>> {
        let mut ids: Vec<String> = self.read_map()?.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    /// Remove all objects from the store.
    pub fn clear(&self) -> StoreResult<()> {
        self.write_map()?.clear();
        Ok(())
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn find(&self, id: &str) -> StoreResult<Option<DrsObject>> {
        Ok(self.read_map()?.get(id).cloned())
    }

    fn insert(&self, object: &DrsObject) -> StoreResult<()> {
        if object.id.is_empty() {
            return Err(StoreError::EmptyId);
        }
        let mut map = self.write_map()?;
        if map.contains_key(&object.id) {
            tracing::debug!(id = %object.id, "insert rejected: duplicate key");
            return Err(StoreError::DuplicateKey(object.id.clone()));
        }
        map.insert(object.id.clone(), object.clone());
        Ok(())
    }

    fn replace(&self, object: &DrsObject, upsert: bool) -> StoreResult<ReplaceOutcome> {
        if object.id.is_empty() {
            return Err(StoreError::EmptyId);
        }
        let mut map = self.write_map()?;
        match map.get_mut(&object.id) {
            Some(existing) => {
                *existing = object.clone();
                Ok(ReplaceOutcome::Replaced)
            }
            None if upsert => {
                map.insert(object.id.clone(), object.clone());
                Ok(ReplaceOutcome::Upserted)
            }
            None => Ok(ReplaceOutcome::NoMatch),
        }
    }

    fn set_access_method(&self, object_id: &str, method: &AccessMethod) -> StoreResult<u64> {
        let Some(access_id) = method.access_id.as_deref() else {
            return Ok(0);
        };
        let mut map = self.write_map()?;
        let Some(object) = map.get_mut(object_id) else {
            return Ok(0);
        };
        let mut matched = 0;
        for element in object
            .access_methods
            .iter_mut()
            .filter(|m| m.has_access_id(access_id))
        {
            *element = method.clone();
            matched += 1;
        }
        Ok(matched)
    }

    fn push_access_method(&self, object_id: &str, method: &AccessMethod) -> StoreResult<u64> {
        let mut map = self.write_map()?;
        let Some(object) = map.get_mut(object_id) else {
            return Ok(0);
        };
        if let Some(access_id) = method.access_id.as_deref() {
            if object.has_access_method(access_id) {
                return Ok(0);
            }
        }
        object.access_methods.push(method.clone());
        Ok(1)
    }

    fn pull_access_method(&self, object_id: &str, access_id: &str) -> StoreResult<u64> {
        let mut map = self.write_map()?;
        let Some(object) = map.get_mut(object_id) else {
            return Ok(0);
        };
        let before = object.access_methods.len();
        object.access_methods.retain(|m| !m.has_access_id(access_id));
        Ok((before - object.access_methods.len()) as u64)
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        Ok(self.write_map()?.remove(id).is_some())
    }

    fn exists(&self, id: &str) -> StoreResult<bool> {
        Ok(self.read_map()?.contains_key(id))
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.objects.read().map(|m| m.len()).unwrap_or_default();
        f.debug_struct("InMemoryObjectStore")
            .field("object_count", &count)
            .finish()
    }
}

/// In-memory holder for the singleton [`ServiceInfo`] document.
#[derive(Debug, Default)]
pub struct InMemoryServiceInfoStore {
    info: RwLock<Option<ServiceInfo>>,
}

impl InMemoryServiceInfoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ServiceInfoStore for InMemoryServiceInfoStore {
    fn find(&self) -> StoreResult<Option<ServiceInfo>> {
        Ok(self.info.read().map_err(poisoned)?.clone())
    }

    fn upsert(&self, info: &ServiceInfo) -> StoreResult<ReplaceOutcome> {
        let mut slot = self.info.write().map_err(poisoned)?;
        let outcome = if slot.is_some() {
            ReplaceOutcome::Replaced
        } else {
            ReplaceOutcome::Upserted
        };
        *slot = Some(info.clone());
        Ok(outcome)
    }
}
