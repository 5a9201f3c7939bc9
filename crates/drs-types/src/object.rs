use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::access::AccessMethod;

/// A registered data object.
///
/// `id` is globally unique and `self_uri` is always derived from it; both are
/// assigned by the registry, so they default to empty on client payloads.
/// Descriptive fields (name, size, checksums, contents, ...) are not
/// interpreted and round-trip through `fields` unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DrsObject {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub self_uri: String,

    #[serde(default)]
    pub access_methods: Vec<AccessMethod>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl DrsObject {
    /// An empty object payload with the given access methods.
    pub fn with_access_methods(access_methods: Vec<AccessMethod>) -> Self {
        Self {
            access_methods,
            ..Default::default()
        }
    }

    /// Builder-style setter for a descriptive field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// All access methods carrying `access_id`, in list order.
    ///
    /// More than one match means the per-object uniqueness invariant is broken;
    /// callers decide how to surface that.
    pub fn access_methods_by_id<'a>(
        &'a self,
        access_id: &'a str,
    ) -> impl Iterator<Item = &'a AccessMethod> + 'a {
        self.access_methods
            .iter()
            .filter(move |m| m.has_access_id(access_id))
    }

    /// Whether any access method carries `access_id`.
    pub fn has_access_method(&self, access_id: &str) -> bool {
        self.access_methods_by_id(access_id).next().is_some()
    }

    /// Assigned access identifiers, in list order.
    pub fn access_ids(&self) -> Vec<&str> {
        self.access_methods
            .iter()
            .filter_map(|m| m.access_id.as_deref())
            .collect()
    }
}
