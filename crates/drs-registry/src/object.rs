use drs_store::{ObjectStore, ReplaceOutcome, StoreError};
use drs_types::DrsObject;

use crate::allocator::allocate_access_ids;
use crate::charset::ResolvedCharset;
use crate::config::RegistryConfig;
use crate::error::RegistryResult;
use crate::id::generate_id;
use crate::retry::{retry, Attempt};

/// Whether a registration created a new record or overwrote an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectOutcome {
    Created,
    Replaced,
}

/// Identifier a registration settled on, plus what it did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registered<O> {
    pub id: String,
    pub outcome: O,
}

enum Mode<'a> {
    Create(ResolvedCharset),
    Replace(&'a str),
}

/// Create or fully replace an object.
///
/// Without `object_id` a fresh identifier is generated and inserted; a
/// duplicate-key conflict means another client raced to the same random id,
/// so a new one is drawn, up to `retries + 1` times. With `object_id` the
/// record is upserted in a single attempt.
///
/// Any `access_methods` in `data` receive freshly allocated access ids first.
/// `id` and `self_uri` in `data` are ignored; `self_uri` is always derived
/// from the final id.
pub fn register_object(
    store: &dyn ObjectStore,
    config: &RegistryConfig,
    mut data: DrsObject,
    object_id: Option<&str>,
    retries: u32,
) -> RegistryResult<Registered<ObjectOutcome>> {
    let mode = match object_id {
        Some(id) => Mode::Replace(id),
        None => Mode::Create(config.objects.resolve()?),
    };

    if !data.access_methods.is_empty() {
        data.access_methods = allocate_access_ids(
            std::mem::take(&mut data.access_methods),
            &config.access_methods,
            retries,
        )?;
    }

    let outcome = retry("register_object", retries, |_| {
        data.id = match &mode {
            Mode::Replace(id) => id.to_string(),
            Mode::Create(charset) => generate_id(charset, config.objects.id_length),
        };
        data.self_uri = config.service.self_uri(&data.id);

        match &mode {
            Mode::Replace(_) => match store.replace(&data, true) {
                Ok(ReplaceOutcome::Replaced) => Attempt::Done(ObjectOutcome::Replaced),
                Ok(_) => Attempt::Done(ObjectOutcome::Created),
                Err(e) => Attempt::Fail(e.into()),
            },
            Mode::Create(_) => match store.insert(&data) {
                Ok(()) => Attempt::Done(ObjectOutcome::Created),
                Err(StoreError::DuplicateKey(_)) => Attempt::Conflict,
                Err(e) => Attempt::Fail(e.into()),
            },
        }
    })?;

    match outcome {
        ObjectOutcome::Created => tracing::info!(id = %data.id, "added object"),
        ObjectOutcome::Replaced => tracing::info!(id = %data.id, "replaced object"),
    }
    Ok(Registered {
        id: data.id,
        outcome,
    })
}
