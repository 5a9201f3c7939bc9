use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The location an access method resolves to, plus any headers a client must
/// send when fetching it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessUrl {
    pub url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<String>,
}

impl AccessUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }
}

/// One way of retrieving the bytes of a [`DrsObject`](crate::DrsObject).
///
/// `access_id` is unique within the owning object only. It is optional on the
/// wire because clients submit methods without one and the registry assigns it.
/// Fields the registry does not interpret are kept verbatim in `fields`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessMethod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_id: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub access_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_url: Option<AccessUrl>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl AccessMethod {
    /// A method of the given transport type pointing at `url`.
    pub fn new(access_type: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            access_type: Some(access_type.into()),
            access_url: Some(AccessUrl::new(url)),
            ..Default::default()
        }
    }

    /// Builder-style setter for the access identifier.
    pub fn with_access_id(mut self, access_id: impl Into<String>) -> Self {
        self.access_id = Some(access_id.into());
        self
    }

    /// Whether this method carries the given access identifier.
    pub fn has_access_id(&self, access_id: &str) -> bool {
        self.access_id.as_deref() == Some(access_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_field_uses_wire_name() {
        let method = AccessMethod::new("s3", "s3://bucket/key");
        let value = serde_json::to_value(&method).unwrap();
        assert_eq!(value["type"], "s3");
        assert!(value.get("access_type").is_none());
        assert!(value.get("access_id").is_none());
    }

    #[test]
    fn unknown_fields_are_preserved() {
        let value = json!({
            "type": "ftp",
            "access_url": { "url": "ftp://example.org/a.fa", "headers": ["None"] },
            "region": "us-east-1",
            "authorizations": { "supported_types": ["None"] }
        });
        let method: AccessMethod = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(method.region.as_deref(), Some("us-east-1"));
        assert!(method.fields.contains_key("authorizations"));
        assert_eq!(serde_json::to_value(&method).unwrap(), value);
    }

    #[test]
    fn has_access_id_matches_exactly() {
        let method = AccessMethod::default().with_access_id("abc");
        assert!(method.has_access_id("abc"));
        assert!(!method.has_access_id("ab"));
        assert!(!AccessMethod::default().has_access_id("abc"));
    }

    #[test]
    fn access_url_headers_default_to_empty() {
        let url: AccessUrl = serde_json::from_value(json!({ "url": "https://x" })).unwrap();
        assert!(url.headers.is_empty());
    }
}
