use std::sync::Arc;

use drs_registry::Registry;

use crate::auth::{AllowAllAuth, AuthProvider, StaticTokenAuth};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub registry: Registry,
    pub auth: Arc<dyn AuthProvider>,
}

impl AppState {
    pub fn new(registry: Registry, auth: Arc<dyn AuthProvider>) -> Self {
        Self { registry, auth }
    }

    /// Pick the auth provider from the token lists. No admin tokens admits
    /// everyone, and read tokens are then irrelevant.
    pub fn with_tokens(registry: Registry, tokens: Vec<String>, read_tokens: Vec<String>) -> Self {
        let auth: Arc<dyn AuthProvider> = if tokens.is_empty() {
            Arc::new(AllowAllAuth)
        } else {
            Arc::new(StaticTokenAuth::new(tokens).with_read_tokens(read_tokens))
        };
        Self::new(registry, auth)
    }
}
