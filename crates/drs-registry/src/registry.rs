use std::sync::Arc;

use drs_store::{InMemoryObjectStore, InMemoryServiceInfoStore, ObjectStore, ServiceInfoStore};
use drs_types::{AccessMethod, AccessUrl, DrsObject, ServiceInfo};

use crate::access::{self, AccessOutcome};
use crate::config::RegistryConfig;
use crate::error::RegistryResult;
use crate::lifecycle;
use crate::object::{self, ObjectOutcome, Registered};
use crate::service_info;

/// Handle bundling the stores and configuration the engine operates on.
///
/// Cheap to clone; every clone shares the same stores. Nothing here is global:
/// callers build a `Registry` and pass it to whatever serves requests.
#[derive(Clone)]
pub struct Registry {
    objects: Arc<dyn ObjectStore>,
    service_info: Arc<dyn ServiceInfoStore>,
    config: Arc<RegistryConfig>,
}

impl Registry {
    pub fn new(
        objects: Arc<dyn ObjectStore>,
        service_info: Arc<dyn ServiceInfoStore>,
        config: RegistryConfig,
    ) -> Self {
        Self {
            objects,
            service_info,
            config: Arc::new(config),
        }
    }

    /// A registry backed by fresh in-memory stores.
    pub fn in_memory(config: RegistryConfig) -> Self {
        Self::new(
            Arc::new(InMemoryObjectStore::new()),
            Arc::new(InMemoryServiceInfoStore::new()),
            config,
        )
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn object_store(&self) -> &dyn ObjectStore {
        self.objects.as_ref()
    }

    // ---- Objects ----

    pub fn register_object(
        &self,
        data: DrsObject,
        object_id: Option<&str>,
    ) -> RegistryResult<Registered<ObjectOutcome>> {
        object::register_object(
            self.objects.as_ref(),
            &self.config,
            data,
            object_id,
            self.config.retries,
        )
    }

    pub fn get_object(&self, object_id: &str) -> RegistryResult<DrsObject> {
        lifecycle::get_object(self.objects.as_ref(), object_id)
    }

    pub fn delete_object(&self, object_id: &str) -> RegistryResult<String> {
        lifecycle::delete_object(self.objects.as_ref(), object_id)
    }

    // ---- Access methods ----

    pub fn register_access_method(
        &self,
        data: AccessMethod,
        object_id: &str,
        access_id: Option<&str>,
    ) -> RegistryResult<Registered<AccessOutcome>> {
        access::register_access_method(
            self.objects.as_ref(),
            &self.config,
            data,
            object_id,
            access_id,
            self.config.retries,
        )
    }

    pub fn get_access_url(&self, object_id: &str, access_id: &str) -> RegistryResult<AccessUrl> {
        lifecycle::get_access_url(self.objects.as_ref(), object_id, access_id)
    }

    pub fn delete_access_method(&self, object_id: &str, access_id: &str) -> RegistryResult<String> {
        lifecycle::delete_access_method(self.objects.as_ref(), object_id, access_id)
    }

    // ---- Service info ----

    pub fn service_info(&self) -> RegistryResult<ServiceInfo> {
        service_info::get_service_info(self.service_info.as_ref())
    }

    pub fn bootstrap_service_info(&self, info: &ServiceInfo) -> RegistryResult<bool> {
        service_info::bootstrap_service_info(self.service_info.as_ref(), info)
    }

    pub fn set_service_info(&self, info: &ServiceInfo) -> RegistryResult<String> {
        service_info::set_service_info(self.service_info.as_ref(), &self.config.service, info)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::CharsetSpec;
    use crate::error::RegistryError;

    fn registry() -> Registry {
        let mut config = RegistryConfig::default();
        config.objects.id_charset = CharsetSpec::from("abc");
        config.objects.id_length = 3;
        Registry::in_memory(config)
    }

    #[test]
    fn full_lifecycle() {
        let reg = registry();

        let data = DrsObject::with_access_methods(vec![AccessMethod::new("https", "https://a")])
            .with_field("name", "x");
        let created = reg.register_object(data, None).unwrap();
        assert!(created.id.chars().all(|c| "abc".contains(c)));

        let obj = reg.get_object(&created.id).unwrap();
        assert_eq!(obj.fields["name"], "x");
        assert!(obj.self_uri.ends_with(&format!("/{}", created.id)));
        let first = obj.access_ids()[0].to_string();

        let added = reg
            .register_access_method(AccessMethod::new("s3", "s3://b"), &created.id, None)
            .unwrap();
        assert_eq!(added.outcome, AccessOutcome::NoMatchAppend);
        assert_eq!(reg.get_access_url(&created.id, &added.id).unwrap().url, "s3://b");

        assert_eq!(reg.delete_access_method(&created.id, &first).unwrap(), first);
        assert!(matches!(
            reg.delete_access_method(&created.id, &added.id).unwrap_err(),
            RegistryError::LastAccessMethod { .. }
        ));

        assert_eq!(reg.delete_object(&created.id).unwrap(), created.id);
        assert!(matches!(
            reg.get_object(&created.id).unwrap_err(),
            RegistryError::ObjectNotFound(_)
        ));
    }

    #[test]
    fn clones_share_stores() {
        let a = registry();
        let b = a.clone();
        let id = a.register_object(DrsObject::default(), Some("a001")).unwrap().id;
        assert!(b.get_object(&id).is_ok());
    }

    #[test]
    fn concurrent_creates_all_land() {
        use std::thread;

        let mut config = RegistryConfig::default();
        config.objects.id_charset = CharsetSpec::from("digits");
        config.objects.id_length = 2;
        config.retries = 500;
        let reg = Registry::in_memory(config);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let reg = reg.clone();
                thread::spawn(move || {
                    (0..10)
                        .map(|_| reg.register_object(DrsObject::default(), None).unwrap().id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<String> = handles
            .into_iter()
            .flat_map(|h| h.join().expect("thread should not panic"))
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 40);
    }

    #[test]
    fn debug_hides_stores() {
        let debug = format!("{:?}", registry());
        assert!(debug.contains("Registry"));
        assert!(debug.contains("retries"));
    }
}
