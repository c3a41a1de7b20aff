//! Wire request/response bodies for the scan authority's REST API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sweep::model::ScanKind;

/// Body for POST /auth/signup
#[derive(Debug, Serialize)]
pub struct SignupRequest<'a> {
  pub email: &'a str,
  pub password: &'a str,
}

/// Response for POST /auth/token
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
  pub access_token: String,
  pub token_type: String,
}

/// Body for POST /data/save
#[derive(Debug, Serialize)]
pub struct CreateScanRequest {
  pub name: String,
  pub kind: ScanKind,
  pub items: Vec<Value>,
}

/// Response for POST /data/save: the authority-assigned descriptor
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScanResponse {
  pub id: String,
  pub kind: ScanKind,
  pub count: usize,
  pub timestamp: DateTime<Utc>,
}

/// Response for DELETE /data/{id}
#[derive(Debug, Deserialize)]
pub struct DeleteResponse {
  pub deleted: bool,
}
