use std::collections::HashSet;

use drs_types::AccessMethod;

use crate::config::IdConfig;
use crate::error::RegistryResult;
use crate::id::generate_id;
use crate::retry::{retry, Attempt};

/// Assign a fresh `access_id` to every method in `methods`.
///
/// Order is preserved and any `access_id` already present is overwritten.
/// Identifiers are pairwise distinct within the batch: a draw that collides
/// with one already handed out is redrawn, up to `retries + 1` draws per
/// method. If any method cannot get a unique identifier the whole batch fails
/// with [`RegistryError::Unavailable`](crate::RegistryError::Unavailable) and
/// nothing is returned.
pub fn allocate_access_ids(
    methods: Vec<AccessMethod>,
    config: &IdConfig,
    retries: u32,
) -> RegistryResult<Vec<AccessMethod>> {
    let charset = config.resolve()?;
    let mut assigned: HashSet<String> = HashSet::with_capacity(methods.len());
    let mut out = Vec::with_capacity(methods.len());

    for mut method in methods {
        let access_id = retry("allocate_access_ids", retries, |_| {
            let candidate = generate_id(&charset, config.id_length);
            if assigned.contains(&candidate) {
                Attempt::Conflict
            } else {
                Attempt::Done(candidate)
            }
        })?;
        assigned.insert(access_id.clone());
        method.access_id = Some(access_id);
        out.push(method);
    }

    Ok(out)
}
