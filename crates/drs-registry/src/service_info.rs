use drs_store::{ReplaceOutcome, ServiceInfoStore};
use drs_types::ServiceInfo;

use crate::config::UriConfig;
use crate::error::{RegistryError, RegistryResult};

/// The stored service-info document.
pub fn get_service_info(store: &dyn ServiceInfoStore) -> RegistryResult<ServiceInfo> {
    store.find()?.ok_or(RegistryError::ServiceInfoNotFound)
}

/// Seed the store from static configuration at startup.
///
/// Returns `false` when the stored document already equals `info`, `true` when
/// it was written.
pub fn bootstrap_service_info(
    store: &dyn ServiceInfoStore,
    info: &ServiceInfo,
) -> RegistryResult<bool> {
    info.validate()?;
    if store.find()?.as_ref() == Some(info) {
        tracing::debug!(id = %info.id, "service info already up to date");
        return Ok(false);
    }
    store.upsert(info)?;
    tracing::info!(id = %info.id, "service info set from configuration");
    Ok(true)
}

/// Replace the service-info document, returning its location URL.
pub fn set_service_info(
    store: &dyn ServiceInfoStore,
    uri: &UriConfig,
    info: &ServiceInfo,
) -> RegistryResult<String> {
    info.validate()?;
    match store.upsert(info)? {
        ReplaceOutcome::Replaced => tracing::info!(id = %info.id, "service info replaced"),
        _ => tracing::info!(id = %info.id, "service info created"),
    }
    Ok(uri.service_info_location())
}
