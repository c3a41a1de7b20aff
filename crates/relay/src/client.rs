//! HTTP relay to the scan authority
//!
//! One reqwest-backed client implementing the authentication, persistence,
//! and scan-trigger boundaries against the authority's REST API.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tokio::time::timeout;

use sweep::model::{SavedScan, ScanKind, ScanRecord};
use sweep::probe::ScanProbe;

use crate::auth::{AuthApi, Credentials, Principal, SessionContext};
use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::registry::PersistenceApi;
use crate::types::{CreateScanRequest, CreateScanResponse, DeleteResponse, SignupRequest, TokenResponse};

pub struct HttpRelay {
  client: Client,
  base_url: String,
  timeout_secs: u64,
}

impl HttpRelay {
  /// Create a relay with default configuration
  pub fn new() -> Result<Self> {
    Self::with_config(RelayConfig::default())
  }

  /// Create a relay with custom configuration
  pub fn with_config(config: RelayConfig) -> Result<Self> {
    let base_url = config.validated_base()?;
    let client = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;

    Ok(Self { client, base_url, timeout_secs: config.timeout_secs })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  async fn execute(&self, request: RequestBuilder) -> Result<Response, RelayError> {
    let response = timeout(Duration::from_secs(self.timeout_secs), request.send()).await??;

    if response.status() == StatusCode::UNAUTHORIZED {
      return Err(RelayError::Unauthorized);
    }
    if !response.status().is_success() {
      let status = response.status();
      let body = response.text().await.unwrap_or_default();
      return Err(RelayError::transport(format!("HTTP {status}: {body}")));
    }

    Ok(response)
  }
}

#[async_trait]
impl AuthApi for HttpRelay {
  async fn signup(&self, credentials: &Credentials) -> Result<Principal, RelayError> {
    let request = SignupRequest { email: &credentials.email, password: &credentials.password };
    let response =
      self.execute(self.client.post(self.url("/auth/signup")).json(&request)).await?;

    Ok(response.json().await?)
  }

  async fn authenticate(&self, credentials: &Credentials) -> Result<SessionContext, RelayError> {
    // OAuth2 password flow: the authority expects a form body with the
    // email under "username"
    let form = [("username", credentials.email.as_str()), ("password", credentials.password.as_str())];
    let response = self.execute(self.client.post(self.url("/auth/token")).form(&form)).await?;
    let token: TokenResponse = response.json().await?;

    let principal = self.resolve_principal(&token.access_token).await?;
    Ok(SessionContext::new(token.access_token, principal))
  }

  async fn resolve_principal(&self, token: &str) -> Result<Principal, RelayError> {
    let response =
      self.execute(self.client.get(self.url("/auth/me")).bearer_auth(token)).await?;

    Ok(response.json().await?)
  }
}

#[async_trait]
impl PersistenceApi for HttpRelay {
  async fn list_saved(&self, token: &str) -> Result<Vec<SavedScan>, RelayError> {
    let response =
      self.execute(self.client.get(self.url("/data/list")).bearer_auth(token)).await?;

    Ok(response.json().await?)
  }

  async fn create_saved(
    &self,
    token: &str,
    request: CreateScanRequest,
  ) -> Result<CreateScanResponse, RelayError> {
    let response = self
      .execute(self.client.post(self.url("/data/save")).bearer_auth(token).json(&request))
      .await?;

    Ok(response.json().await?)
  }

  async fn fetch_saved(&self, token: &str, id: &str) -> Result<SavedScan, RelayError> {
    let response = self
      .execute(self.client.get(self.url(&format!("/data/{id}"))).bearer_auth(token))
      .await?;

    Ok(response.json().await?)
  }

  async fn delete_saved(&self, token: &str, id: &str) -> Result<(), RelayError> {
    let response = self
      .execute(self.client.delete(self.url(&format!("/data/{id}"))).bearer_auth(token))
      .await?;

    let result: DeleteResponse = response.json().await?;
    if !result.deleted {
      return Err(RelayError::transport(format!("authority refused to delete scan '{id}'")));
    }
    Ok(())
  }

  async fn fetch_saved_content(&self, token: &str, id: &str) -> Result<String, RelayError> {
    let response = self
      .execute(self.client.get(self.url(&format!("/data/{id}/download"))).bearer_auth(token))
      .await?;

    Ok(response.text().await?)
  }
}

#[async_trait]
impl ScanProbe for HttpRelay {
  async fn perform_scan(&self, kind: ScanKind) -> Result<Vec<ScanRecord>> {
    let path = match kind {
      ScanKind::Wifi => "/scan/wifi",
      ScanKind::Bluetooth => "/scan/ble",
      ScanKind::Zigbee => "/scan/zigbee",
    };

    let response = self.execute(self.client.get(self.url(path))).await?;
    let values: Vec<serde_json::Value> = response.json().await.map_err(RelayError::from)?;

    ScanRecord::from_values(kind, values)
  }
}

/// Get the configured relay (checks environment variables)
pub fn get_relay() -> Result<HttpRelay> {
  HttpRelay::with_config(RelayConfig::from_env())
}
