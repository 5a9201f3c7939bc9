//! HTTP server for the DRS registry.
//!
//! Exposes object, access-method, and service-info endpoints over the
//! lifecycle engine in `drs-registry`, with bearer-token authentication for
//! mutating calls.

pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use auth::{Action, AllowAllAuth, AuthProvider, Credentials, Identity, StaticTokenAuth};
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::build_router;
pub use server::DrsServer;
pub use state::AppState;
