use anyhow::{Context, Result};
use url::Url;

/// Configuration for the scan authority's HTTP relay
#[derive(Debug, Clone)]
pub struct RelayConfig {
  /// Base URL of the authority's API (e.g. "http://127.0.0.1:8000/api")
  pub base_url: String,
  /// Request timeout in seconds
  pub timeout_secs: u64,
}

impl Default for RelayConfig {
  fn default() -> Self {
    Self { base_url: "http://127.0.0.1:8000/api".to_string(), timeout_secs: 30 }
  }
}

impl RelayConfig {
  /// Build configuration from the environment, falling back to defaults.
  /// `SIGNAL_ANALYZER_URL` overrides the base URL,
  /// `SIGNAL_ANALYZER_TIMEOUT_SECS` the timeout.
  pub fn from_env() -> Self {
    let defaults = Self::default();

    let base_url = std::env::var("SIGNAL_ANALYZER_URL").unwrap_or(defaults.base_url);
    let timeout_secs = std::env::var("SIGNAL_ANALYZER_TIMEOUT_SECS")
      .ok()
      .and_then(|v| v.parse().ok())
      .unwrap_or(defaults.timeout_secs);

    Self { base_url, timeout_secs }
  }

  /// Validate the base URL, returning it with any trailing slash trimmed
  pub fn validated_base(&self) -> Result<String> {
    let url = Url::parse(&self.base_url)
      .with_context(|| format!("invalid base URL: {}", self.base_url))?;
    Ok(url.as_str().trim_end_matches('/').to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_validated_base_trims_trailing_slash() {
    let config =
      RelayConfig { base_url: "http://localhost:8000/api/".to_string(), timeout_secs: 5 };
    assert_eq!(config.validated_base().unwrap(), "http://localhost:8000/api");
  }

  #[test]
  fn test_validated_base_rejects_garbage() {
    let config = RelayConfig { base_url: "not a url".to_string(), timeout_secs: 5 };
    assert!(config.validated_base().is_err());
  }
}
