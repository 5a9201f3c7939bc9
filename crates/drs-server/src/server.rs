use tokio::net::TcpListener;

use drs_registry::Registry;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// DRS registry server.
pub struct DrsServer {
    config: ServerConfig,
    state: AppState,
}

impl DrsServer {
    /// Validate `config`, build an in-memory registry and seed its service info.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        Self::with_registry(Registry::in_memory(config.registry.clone()), config)
    }

    /// Like [`DrsServer::new`] but over caller-provided stores.
    pub fn with_registry(registry: Registry, config: ServerConfig) -> ServerResult<Self> {
        config.validate()?;
        if let Some(info) = &config.service_info {
            registry.bootstrap_service_info(info)?;
        } else {
            tracing::warn!("no service info configured; GET /service-info will answer 404");
        }
        let state = AppState::with_tokens(
            registry,
            config.admin_tokens.clone(),
            config.read_tokens.clone(),
        );
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.state.registry
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            addr = %self.config.bind_addr,
            base_url = %self.config.registry.service.base_url(),
            "DRS server listening"
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
