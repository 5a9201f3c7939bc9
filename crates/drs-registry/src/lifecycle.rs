//! Reads and deletes, with the invariants that keep a record consistent.
//!
//! - An object keeps at least one access method: deleting the last one is a
//!   client error, checked before anything is mutated.
//! - `access_id` is unique within an object. If a read finds it twice the
//!   record is already corrupt, and that is reported rather than papered over
//!   by picking one.

use drs_store::ObjectStore;
use drs_types::{AccessUrl, DrsObject};

use crate::error::{RegistryError, RegistryResult};

/// Fetch an object by id.
pub fn get_object(store: &dyn ObjectStore, object_id: &str) -> RegistryResult<DrsObject> {
    store
        .find(object_id)?
        .ok_or_else(|| RegistryError::ObjectNotFound(object_id.to_string()))
}

/// Resolve the access URL of one access method.
pub fn get_access_url(
    store: &dyn ObjectStore,
    object_id: &str,
    access_id: &str,
) -> RegistryResult<AccessUrl> {
    let object = get_object(store, object_id)?;
    let mut matches = object.access_methods_by_id(access_id);

    let method = match (matches.next(), matches.next()) {
        (Some(method), None) => method,
        (None, _) => {
            return Err(RegistryError::AccessUrlNotFound {
                object_id: object_id.to_string(),
                access_id: access_id.to_string(),
            })
        }
        (Some(_), Some(_)) => {
            let count = object.access_methods_by_id(access_id).count();
            tracing::error!(object_id, access_id, count, "access id is not unique");
            return Err(RegistryError::DuplicateAccessId {
                object_id: object_id.to_string(),
                access_id: access_id.to_string(),
                count,
            });
        }
    };

    method
        .access_url
        .clone()
        .ok_or_else(|| RegistryError::MissingAccessUrl {
            object_id: object_id.to_string(),
            access_id: access_id.to_string(),
        })
}

/// Delete a whole object, returning its id.
pub fn delete_object(store: &dyn ObjectStore, object_id: &str) -> RegistryResult<String> {
    if !store.delete(object_id)? {
        return Err(RegistryError::ObjectNotFound(object_id.to_string()));
    }
    tracing::info!(object_id, "deleted object");
    Ok(object_id.to_string())
}

/// Delete one access method, returning its access id.
///
/// Fails with a not-found if the object or the access method is absent, with
/// an internal error if the access id occurs more than once, and with a bad
/// request if it is the object's only access method. A removal that
/// affects nothing after those checks passed means a concurrent writer got
/// there first and is reported as an internal error.
pub fn delete_access_method(
    store: &dyn ObjectStore,
    object_id: &str,
    access_id: &str,
) -> RegistryResult<String> {
    let object = get_object(store, object_id)?;

    match object.access_methods_by_id(access_id).count() {
        0 => {
            return Err(RegistryError::AccessMethodNotFound {
                object_id: object_id.to_string(),
                access_id: access_id.to_string(),
            })
        }
        1 => {}
        count => {
            // A pull would remove every copy and could empty the object.
            tracing::error!(object_id, access_id, count, "access id is not unique");
            return Err(RegistryError::DuplicateAccessId {
                object_id: object_id.to_string(),
                access_id: access_id.to_string(),
                count,
            });
        }
    }

    if object.access_methods.len() == 1 {
        tracing::warn!(
            object_id,
            access_id,
            "will not delete only remaining access method"
        );
        return Err(RegistryError::LastAccessMethod {
            object_id: object_id.to_string(),
            access_id: access_id.to_string(),
        });
    }

    if store.pull_access_method(object_id, access_id)? == 0 {
        tracing::error!(object_id, access_id, "access method removal had no effect");
        return Err(RegistryError::LostUpdate {
            object_id: object_id.to_string(),
            access_id: access_id.to_string(),
        });
    }

    tracing::info!(object_id, access_id, "deleted access method");
    Ok(access_id.to_string())
}
