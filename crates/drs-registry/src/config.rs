use serde::{Deserialize, Serialize};

use crate::charset::{CharsetSpec, ResolvedCharset};
use crate::error::{IdError, RegistryResult};

/// Parameters for building externally visible URIs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UriConfig {
    /// URI scheme, e.g. `http` or `drs`.
    pub url_prefix: String,
    pub external_host: String,
    pub external_port: u16,
    /// Path prefix under which the API is mounted, e.g. `ga4gh/drs/v1`.
    pub api_path: String,
}

impl Default for UriConfig {
    fn default() -> Self {
        Self {
            url_prefix: "http".into(),
            external_host: "localhost".into(),
            external_port: 8080,
            api_path: "ga4gh/drs/v1".into(),
        }
    }
}

impl UriConfig {
    /// `{scheme}://{host}:{port}/{api_path}` with no trailing slash.
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}:{}/{}",
            self.url_prefix,
            self.external_host,
            self.external_port,
            self.api_path.trim_matches('/')
        )
    }

    /// Canonical self URI for the object `id`.
    pub fn self_uri(&self, id: &str) -> String {
        format!("{}/{id}", self.base_url())
    }

    /// Location of the service-info resource.
    pub fn service_info_location(&self) -> String {
        format!("{}/service-info", self.base_url())
    }
}

/// Identifier generation settings for one kind of record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdConfig {
    pub id_charset: CharsetSpec,
    pub id_length: usize,
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            id_charset: CharsetSpec::default(),
            id_length: 6,
        }
    }
}

impl IdConfig {
    pub fn resolve(&self) -> Result<ResolvedCharset, IdError> {
        self.id_charset.resolve()
    }

    /// Resolve the charset and check the length can produce an identifier.
    pub fn validate(&self) -> Result<(), IdError> {
        if self.id_length == 0 {
            return Err(IdError::ZeroLength);
        }
        self.resolve().map(|_| ())
    }
}

/// Everything the lifecycle engine needs from configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub service: UriConfig,
    pub objects: IdConfig,
    pub access_methods: IdConfig,
    /// Extra attempts allowed when a generated identifier collides.
    pub retries: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            service: UriConfig::default(),
            objects: IdConfig::default(),
            access_methods: IdConfig::default(),
            retries: 9,
        }
    }
}

impl RegistryConfig {
    /// Resolve both charsets up front so a bad expression fails at startup
    /// rather than on the first request.
    pub fn validate(&self) -> RegistryResult<()> {
        self.objects.validate()?;
        self.access_methods.validate()?;
        Ok(())
    }
}
