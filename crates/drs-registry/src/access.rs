use drs_store::ObjectStore;
use drs_types::AccessMethod;

use crate::charset::ResolvedCharset;
use crate::config::RegistryConfig;
use crate::error::{RegistryError, RegistryResult};
use crate::id::generate_id;
use crate::object::Registered;
use crate::retry::{retry, Attempt};

/// Which branch of the create-or-replace decision a registration took.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    /// An element with the requested `access_id` existed and was overwritten.
    MatchedReplace,
    /// No element matched and the method was appended.
    NoMatchAppend,
}

enum Mode<'a> {
    Add(ResolvedCharset),
    Replace(&'a str),
}

/// Add or replace one access method on an existing object.
///
/// The owning object must exist; this never creates one. Without `access_id`
/// a fresh id is generated per attempt and appended under a uniqueness guard,
/// retrying up to `retries + 1` times if the guard rejects it. With
/// `access_id` the matching element is overwritten in place, or, when no
/// element matches, the method is appended under that id.
///
/// Only the targeted element changes; the rest of the object is untouched.
pub fn register_access_method(
    store: &dyn ObjectStore,
    config: &RegistryConfig,
    mut data: AccessMethod,
    object_id: &str,
    access_id: Option<&str>,
    retries: u32,
) -> RegistryResult<Registered<AccessOutcome>> {
    if !store.exists(object_id)? {
        return Err(RegistryError::ObjectNotFound(object_id.to_string()));
    }

    let mode = match access_id {
        Some(id) => Mode::Replace(id),
        None => Mode::Add(config.access_methods.resolve()?),
    };

    let outcome = retry("register_access_method", retries, |_| {
        let candidate = match &mode {
            Mode::Replace(id) => id.to_string(),
            Mode::Add(charset) => generate_id(charset, config.access_methods.id_length),
        };
        data.access_id = Some(candidate);

        if let Mode::Replace(_) = mode {
            match store.set_access_method(object_id, &data) {
                Ok(0) => {}
                Ok(_) => return Attempt::Done(AccessOutcome::MatchedReplace),
                Err(e) => return Attempt::Fail(e.into()),
            }
        }

        match store.push_access_method(object_id, &data) {
            Ok(0) => match store.exists(object_id) {
                Ok(true) => Attempt::Conflict,
                Ok(false) => RegistryError::ObjectNotFound(object_id.to_string()).into(),
                Err(e) => Attempt::Fail(e.into()),
            },
            Ok(_) => Attempt::Done(AccessOutcome::NoMatchAppend),
            Err(e) => Attempt::Fail(e.into()),
        }
    })?;

    let access_id = data.access_id.unwrap_or_default();
    match outcome {
        AccessOutcome::MatchedReplace => tracing::info!(
            object_id,
            access_id = %access_id,
            "replaced access method"
        ),
        AccessOutcome::NoMatchAppend => tracing::info!(
            object_id,
            access_id = %access_id,
            "added access method"
        ),
    }
    Ok(Registered {
        id: access_id,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    use drs_store::InMemoryObjectStore;

    use crate::charset::CharsetSpec;
    use crate::testing::{seed, RacingStore};

    fn config(charset: &str, length: usize) -> RegistryConfig {
        let mut c = RegistryConfig::default();
        c.access_methods.id_charset = CharsetSpec::from(charset);
        c.access_methods.id_length = length;
        c
    }

    fn method(url: &str) -> AccessMethod {
        AccessMethod::new("s3", url)
    }

    #[test]
    fn missing_object_is_not_found() {
        let store = InMemoryObjectStore::new();
        let err = register_access_method(&store, &config("digits", 4), method("s3://x"), "nope", None, 9)
            .unwrap_err();
        assert!(matches!(err, RegistryError::ObjectNotFound(id) if id == "nope"));
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn add_appends_with_generated_id() {
        let store = InMemoryObjectStore::new();
        let before = seed(&store, "a001", &["1"]);

        let reg = register_access_method(&store, &config("digits", 4), method("s3://x"), "a001", None, 9)
            .unwrap();
        assert_eq!(reg.outcome, AccessOutcome::NoMatchAppend);
        assert_eq!(reg.id.len(), 4);

        let after = store.find("a001").unwrap().unwrap();
        assert_eq!(after.access_ids(), vec!["1", reg.id.as_str()]);
        assert_eq!(after.access_methods[0], before.access_methods[0]);
        assert_eq!(after.fields, before.fields);
        assert_eq!(after.self_uri, before.self_uri);
    }

    #[test]
    fn add_avoids_ids_already_on_the_object() {
        let store = InMemoryObjectStore::new();
        seed(&store, "a001", &["a"]);
        // Only "b" is free; the guard rejects every draw of "a".
        let reg = register_access_method(&store, &config("ab", 1), method("s3://x"), "a001", None, 200)
            .unwrap();
        assert_eq!(reg.id, "b");
    }

    #[test]
    fn add_exhaustion_is_unavailable() {
        let store = InMemoryObjectStore::new();
        seed(&store, "a001", &["a"]);
        let err = register_access_method(&store, &config("a", 1), method("s3://x"), "a001", None, 3)
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Unavailable { operation: "register_access_method", attempts: 4 }
        ));
        assert_eq!(store.find("a001").unwrap().unwrap().access_methods.len(), 1);
    }

    #[test]
    fn add_retries_after_lost_race() {
        let store = RacingStore::new(0, 2);
        seed(&store, "a001", &["1"]);
        let reg = register_access_method(&store, &config("digits", 6), method("s3://x"), "a001", None, 9)
            .unwrap();
        assert_eq!(store.pushes.load(Ordering::SeqCst), 3);
        assert!(store.find("a001").unwrap().unwrap().has_access_method(&reg.id));
    }

    #[test]
    fn replace_overwrites_matching_element_only() {
        let store = InMemoryObjectStore::new();
        seed(&store, "a001", &["1", "2", "3"]);

        let reg = register_access_method(&store, &config("digits", 4), method("s3://new"), "a001", Some("2"), 9)
            .unwrap();
        assert_eq!(reg, Registered { id: "2".into(), outcome: AccessOutcome::MatchedReplace });

        let after = store.find("a001").unwrap().unwrap();
        assert_eq!(after.access_ids(), vec!["1", "2", "3"]);
        assert_eq!(after.access_methods[1].access_url.as_ref().unwrap().url, "s3://new");
        assert_eq!(after.access_methods[0].access_type.as_deref(), Some("https"));
    }

    #[test]
    fn replace_with_identical_content_is_still_a_match() {
        let store = InMemoryObjectStore::new();
        let obj = seed(&store, "a001", &["1"]);
        let same = obj.access_methods[0].clone();
        let reg = register_access_method(&store, &config("digits", 4), same, "a001", Some("1"), 0)
            .unwrap();
        assert_eq!(reg.outcome, AccessOutcome::MatchedReplace);
    }

    #[test]
    fn replace_without_match_appends_under_given_id() {
        let store = InMemoryObjectStore::new();
        seed(&store, "a001", &["1"]);
        let reg = register_access_method(&store, &config("digits", 4), method("s3://x"), "a001", Some("custom"), 9)
            .unwrap();
        assert_eq!(reg, Registered { id: "custom".into(), outcome: AccessOutcome::NoMatchAppend });
        assert_eq!(store.find("a001").unwrap().unwrap().access_ids(), vec!["1", "custom"]);
    }

    #[test]
    fn supplied_access_id_in_body_is_overridden() {
        let store = InMemoryObjectStore::new();
        seed(&store, "a001", &["1"]);
        let data = method("s3://x").with_access_id("1");
        let reg = register_access_method(&store, &config("digits", 4), data, "a001", Some("9"), 9)
            .unwrap();
        assert_eq!(reg.id, "9");
        assert_eq!(store.find("a001").unwrap().unwrap().access_ids(), vec!["1", "9"]);
    }

    #[test]
    fn object_deleted_mid_operation_is_not_found() {
        struct Vanishing(InMemoryObjectStore);
        impl ObjectStore for Vanishing {
            fn find(&self, id: &str) -> drs_store::StoreResult<Option<drs_types::DrsObject>> {
                self.0.find(id)
            }
            fn insert(&self, object: &drs_types::DrsObject) -> drs_store::StoreResult<()> {
                self.0.insert(object)
            }
            fn replace(
                &self,
                object: &drs_types::DrsObject,
                upsert: bool,
            ) -> drs_store::StoreResult<drs_store::ReplaceOutcome> {
                self.0.replace(object, upsert)
            }
            fn set_access_method(&self, id: &str, m: &AccessMethod) -> drs_store::StoreResult<u64> {
                self.0.set_access_method(id, m)
            }
            fn push_access_method(&self, id: &str, m: &AccessMethod) -> drs_store::StoreResult<u64> {
                // Another client deletes the object just before our push lands.
                self.0.delete(id)?;
                self.0.push_access_method(id, m)
            }
            fn pull_access_method(&self, id: &str, a: &str) -> drs_store::StoreResult<u64> {
                self.0.pull_access_method(id, a)
            }
            fn delete(&self, id: &str) -> drs_store::StoreResult<bool> {
                self.0.delete(id)
            }
        }

        let store = Vanishing(InMemoryObjectStore::new());
        seed(&store, "a001", &["1"]);
        let err = register_access_method(&store, &config("digits", 4), method("s3://x"), "a001", None, 9)
            .unwrap_err();
        assert!(matches!(err, RegistryError::ObjectNotFound(_)));
    }
}
