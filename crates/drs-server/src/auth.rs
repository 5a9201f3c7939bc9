use std::collections::HashSet;

use async_trait::async_trait;
use axum::http::{header, HeaderMap};

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub is_admin: bool,
}

impl Identity {
    pub fn anonymous() -> Self { Self { name: "anonymous".into(), is_admin: false } }
    pub fn admin(name: impl Into<String>) -> Self { Self { name: name.into(), is_admin: true } }
    pub fn reader(name: impl Into<String>) -> Self { Self { name: name.into(), is_admin: false } }

    pub fn is_anonymous(&self) -> bool {
        *self == Self::anonymous()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    Bearer(String),
    Anonymous,
}

impl Credentials {
    /// Read credentials from an `Authorization: Bearer <token>` header.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|token| Self::Bearer(token.trim().to_string()))
            .unwrap_or(Self::Anonymous)
    }
}

fn short(token: &str, n: usize) -> String {
    token.chars().take(n).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Read,
    Write,
    ManageServiceInfo,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
            Self::ManageServiceInfo => write!(f, "manage-service-info"),
        }
    }
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<Identity>;
    async fn authorize(&self, identity: &Identity, action: Action) -> ServerResult<bool>;
}

/// Admit every caller for every action.
pub struct AllowAllAuth;

#[async_trait]
impl AuthProvider for AllowAllAuth {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<Identity> {
        match credentials {
            Credentials::Bearer(token) => Ok(Identity::admin(format!("bearer:{}", short(token, 8)))),
            Credentials::Anonymous => Ok(Identity::anonymous()),
        }
    }

    async fn authorize(&self, _identity: &Identity, _action: Action) -> ServerResult<bool> {
        Ok(true)
    }
}

/// Reads are open; mutations need one of a fixed set of admin tokens.
///
/// Read tokens identify a caller without granting writes.
pub struct StaticTokenAuth {
    tokens: HashSet<String>,
    read_tokens: HashSet<String>,
}

impl StaticTokenAuth {
    pub fn new(tokens: impl IntoIterator<Item = String>) -> Self {
        Self { tokens: tokens.into_iter().collect(), read_tokens: HashSet::new() }
    }

    pub fn with_read_tokens(mut self, tokens: impl IntoIterator<Item = String>) -> Self {
        self.read_tokens = tokens.into_iter().collect();
        self
    }
}

#[async_trait]
impl AuthProvider for StaticTokenAuth {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<Identity> {
        match credentials {
            Credentials::Bearer(token) if self.tokens.contains(token) => {
                Ok(Identity::admin(format!("token:{}", short(token, 4))))
            }
            Credentials::Bearer(token) if self.read_tokens.contains(token) => {
                Ok(Identity::reader(format!("reader:{}", short(token, 4))))
            }
            Credentials::Bearer(_) => Err(ServerError::Unauthorized("unknown bearer token".into())),
            Credentials::Anonymous => Ok(Identity::anonymous()),
        }
    }

    async fn authorize(&self, identity: &Identity, action: Action) -> ServerResult<bool> {
        Ok(match action {
            Action::Read => true,
            Action::Write | Action::ManageServiceInfo => identity.is_admin,
        })
    }
}

/// Authenticate the request and check it may perform `action`.
pub async fn require(
    auth: &dyn AuthProvider,
    headers: &HeaderMap,
    action: Action,
) -> ServerResult<Identity> {
    let identity = auth.authenticate(&Credentials::from_headers(headers)).await?;
    if auth.authorize(&identity, action).await? {
        return Ok(identity);
    }
    if identity.is_anonymous() {
        Err(ServerError::Unauthorized(format!("{action} requires a bearer token")))
    } else {
        Err(ServerError::Forbidden { identity: identity.name, action: action.to_string() })
    }
}
