use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RelayError;

/// Login form input
#[derive(Debug, Clone)]
pub struct Credentials {
  pub email: String,
  pub password: String,
}

impl Credentials {
  pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
    Self { email: email.into(), password: password.into() }
  }
}

/// The authenticated account behind a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
  pub id: i64,
  pub email: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<String>,
}

/// An authenticated session against the remote authority.
///
/// Created on successful `authenticate`, invalidated on logout or the first
/// `Unauthorized` response. Replaces any module-level notion of "the current
/// token": every registry operation receives the context explicitly.
#[derive(Debug, Clone)]
pub struct SessionContext {
  token: String,
  principal: Principal,
}

impl SessionContext {
  pub fn new(token: impl Into<String>, principal: Principal) -> Self {
    Self { token: token.into(), principal }
  }

  pub fn token(&self) -> &str {
    &self.token
  }

  pub fn principal(&self) -> &Principal {
    &self.principal
  }

  /// Clear the token. Called on logout and when the authority rejects it;
  /// a context with no token never reaches the wire again.
  pub fn invalidate(&mut self) {
    self.token.clear();
  }

  pub fn is_valid(&self) -> bool {
    !self.token.is_empty()
  }
}

/// The authentication boundary, owned by the remote authority
#[async_trait]
pub trait AuthApi {
  /// Create a new account
  async fn signup(&self, credentials: &Credentials) -> Result<Principal, RelayError>;

  /// Exchange credentials for an authenticated session
  async fn authenticate(&self, credentials: &Credentials) -> Result<SessionContext, RelayError>;

  /// Resolve the account behind a token, or `Unauthorized`
  async fn resolve_principal(&self, token: &str) -> Result<Principal, RelayError>;
}
