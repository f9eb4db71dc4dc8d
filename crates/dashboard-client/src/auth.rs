//! Pluggable token providers.
//!
//! Credentials are injected once when the client is built instead of
//! being re-read from ambient storage by every call site.

use crate::error::ClientError;

/// Token provider consulted before every request. Implementations own
/// acquisition and caching. `Ok(None)` skips the Authorization header.
#[async_trait::async_trait]
pub trait TokenSource: Send + Sync + 'static {
    async fn token(&self) -> Result<Option<String>, ClientError>;
}

/// ServiceNow access token obtained externally (the usual case: auth
/// middleware upstream of the dashboard hands the token over).
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait::async_trait]
impl TokenSource for StaticToken {
    async fn token(&self) -> Result<Option<String>, ClientError> {
        Ok(Some(self.0.clone()))
    }
}

/// Anonymous requests, for tests and the health endpoint.
pub struct NoAuth;

#[async_trait::async_trait]
impl TokenSource for NoAuth {
    async fn token(&self) -> Result<Option<String>, ClientError> {
        Ok(None)
    }
}
