use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// GA4GH service type triple.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceType {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

/// Organization operating the service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    pub url: String,
}

/// Singleton document describing the running service instance.
///
/// At most one exists in a store. It is bootstrapped from static configuration
/// at startup or overwritten by an authenticated management call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub organization: Organization,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

impl ServiceInfo {
    /// Check that every required string is non-empty.
    ///
    /// Presence is already enforced by deserialization; this catches values
    /// that parse but say nothing.
    pub fn validate(&self) -> Result<(), TypeError> {
        let required: [(&'static str, &str); 7] = [
            ("id", &self.id),
            ("name", &self.name),
            ("version", &self.version),
            ("type.group", &self.service_type.group),
            ("type.artifact", &self.service_type.artifact),
            ("type.version", &self.service_type.version),
            ("organization.name", &self.organization.name),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(TypeError::InvalidServiceInfo { field });
            }
        }
        Ok(())
    }
}
