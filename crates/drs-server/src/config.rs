use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use serde::{Deserialize, Serialize};

use drs_registry::RegistryConfig;
use drs_types::ServiceInfo;

use crate::error::{ServerError, ServerResult};

/// Top-level configuration file.
///
/// ```toml
/// bind_addr = "0.0.0.0:8080"
/// admin_tokens = ["s3cret"]
/// read_tokens = ["viewer"]
///
/// [registry]
/// retries = 9
///
/// [registry.service]
/// url_prefix = "drs"
/// external_host = "drs.example.org"
/// external_port = 443
/// api_path = "ga4gh/drs/v1"
///
/// [registry.objects]
/// id_charset = "string.ascii_letters + string.digits"
/// id_length = 6
///
/// [service_info]
/// id = "org.example.drs"
/// # ...
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Bearer tokens allowed to mutate. Empty means every caller may.
    pub admin_tokens: Vec<String>,
    /// Bearer tokens that identify a caller for reads only.
    pub read_tokens: Vec<String>,
    pub registry: RegistryConfig,
    /// Seeded into the store at startup when present.
    pub service_info: Option<ServiceInfo>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            admin_tokens: Vec::new(),
            read_tokens: Vec::new(),
            registry: RegistryConfig::default(),
            service_info: None,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Read and parse a TOML file, then apply environment overrides.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&text)?;
        config.apply_env()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Override the bind address from `DRS_HOST` / `DRS_PORT`.
    pub fn apply_env(&mut self) -> ServerResult<()> {
        self.apply_overrides(
            std::env::var("DRS_HOST").ok().as_deref(),
            std::env::var("DRS_PORT").ok().as_deref(),
        )
    }

    fn apply_overrides(&mut self, host: Option<&str>, port: Option<&str>) -> ServerResult<()> {
        if let Some(host) = host {
            let ip: IpAddr = host
                .parse()
                .map_err(|_| ServerError::Config(format!("DRS_HOST is not an IP address: {host}")))?;
            self.bind_addr.set_ip(ip);
        }
        if let Some(port) = port {
            let port: u16 = port
                .parse()
                .map_err(|_| ServerError::Config(format!("DRS_PORT is not a port: {port}")))?;
            self.bind_addr.set_port(port);
        }
        Ok(())
    }

    /// Check everything that would otherwise only fail on first use.
    pub fn validate(&self) -> ServerResult<()> {
        self.registry
            .validate()
            .map_err(|e| ServerError::Config(e.to_string()))?;
        if let Some(info) = &self.service_info {
            info.validate()
                .map_err(|e| ServerError::Config(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
        bind_addr = "0.0.0.0:9000"
        admin_tokens = ["s3cret"]
        read_tokens = ["viewer"]

        [registry]
        retries = 4

        [registry.service]
        url_prefix = "drs"
        external_host = "drs.example.org"

        [registry.access_methods]
        id_charset = "string.digits"
        id_length = 4

        [service_info]
        id = "org.example.drs"
        name = "Example DRS"
        version = "1.0.0"
        contactUrl = "mailto:support@example.org"

        [service_info.type]
        group = "org.ga4gh"
        artifact = "drs"
        version = "1.1.0"

        [service_info.organization]
        name = "Example"
        url = "https://example.org"
    "#;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert!(c.admin_tokens.is_empty());
        assert!(c.service_info.is_none());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn parses_full_file() {
        let c = ServerConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(c.bind_addr.port(), 9000);
        assert_eq!(c.admin_tokens, vec!["s3cret"]);
        assert_eq!(c.read_tokens, vec!["viewer"]);
        assert_eq!(c.registry.retries, 4);
        assert_eq!(c.registry.service.url_prefix, "drs");
        assert_eq!(c.registry.service.external_port, 8080);
        assert_eq!(c.registry.access_methods.id_length, 4);
        let info = c.service_info.as_ref().unwrap();
        assert_eq!(info.service_type.artifact, "drs");
        assert_eq!(info.contact_url.as_deref(), Some("mailto:support@example.org"));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn empty_file_is_default() {
        let c = ServerConfig::from_toml_str("").unwrap();
        assert_eq!(c.bind_addr, ServerConfig::default().bind_addr);
    }

    #[test]
    fn service_info_without_id_is_rejected() {
        let broken = SAMPLE.replace("id = \"org.example.drs\"", "");
        assert!(matches!(
            ServerConfig::from_toml_str(&broken),
            Err(ServerError::Config(_))
        ));
    }

    #[test]
    fn validate_catches_bad_charset() {
        let mut c = ServerConfig::default();
        c.registry.objects.id_charset = "string.emoji".into();
        assert!(matches!(c.validate(), Err(ServerError::Config(_))));
    }

    #[test]
    fn validate_catches_zero_id_length() {
        let mut c = ServerConfig::default();
        c.registry.access_methods.id_length = 0;
        assert!(matches!(c.validate(), Err(ServerError::Config(_))));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let c = ServerConfig::load(file.path()).unwrap();
        assert_eq!(c.registry.service.external_host, "drs.example.org");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        assert!(matches!(
            ServerConfig::load("/nonexistent/drs.toml"),
            Err(ServerError::Io(_))
        ));
    }

    #[test]
    fn overrides_replace_bind_parts() {
        let mut c = ServerConfig::default();
        c.apply_overrides(Some("0.0.0.0"), Some("9999")).unwrap();
        assert_eq!(c.bind_addr, "0.0.0.0:9999".parse::<SocketAddr>().unwrap());
        assert!(c.apply_overrides(None, Some("http")).is_err());
        assert!(c.apply_overrides(Some("localhost!"), None).is_err());
    }
}
