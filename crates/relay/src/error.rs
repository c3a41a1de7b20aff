use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
  #[error("session token rejected by the remote authority")]
  Unauthorized,

  #[error("transport failure: {message}")]
  Transport { message: String },

  #[error("saved scan '{id}' not found")]
  UnknownScan { id: String },
}

impl RelayError {
  pub fn transport(message: impl Into<String>) -> Self {
    Self::Transport { message: message.into() }
  }

  pub fn unknown_scan(id: impl Into<String>) -> Self {
    Self::UnknownScan { id: id.into() }
  }

  pub fn is_unauthorized(&self) -> bool {
    matches!(self, Self::Unauthorized)
  }
}

impl From<reqwest::Error> for RelayError {
  fn from(err: reqwest::Error) -> Self {
    Self::transport(err.to_string())
  }
}

impl From<tokio::time::error::Elapsed> for RelayError {
  fn from(_: tokio::time::error::Elapsed) -> Self {
    Self::transport("request timed out")
  }
}

impl From<serde_json::Error> for RelayError {
  fn from(err: serde_json::Error) -> Self {
    Self::transport(format!("malformed response body: {err}"))
  }
}
