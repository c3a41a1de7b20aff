use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use relay::auth::{Principal, SessionContext};

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
  token: String,
  principal: Principal,
}

/// The analyzer's home directory (~/.signal-analyzer)
pub fn analyzer_home() -> Result<PathBuf> {
  // Allow tests or callers to override the root directory via env var
  if let Ok(custom) = std::env::var("SIGNAL_ANALYZER_HOME") {
    return Ok(PathBuf::from(custom));
  }

  let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
  Ok(home.join(".signal-analyzer"))
}

fn session_path() -> Result<PathBuf> {
  Ok(analyzer_home()?.join("session.json"))
}

/// Persist the authenticated session for later invocations
pub fn store(session: &SessionContext) -> Result<()> {
  let path = session_path()?;
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }

  let stored = StoredSession {
    token: session.token().to_string(),
    principal: session.principal().clone(),
  };
  fs::write(&path, serde_json::to_string_pretty(&stored)?)?;

  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(&path)?.permissions();
    perms.set_mode(0o600);
    fs::set_permissions(&path, perms)?;
  }

  Ok(())
}

/// Load the stored session, if any
pub fn load() -> Result<Option<SessionContext>> {
  let path = session_path()?;
  if !path.exists() {
    return Ok(None);
  }

  let content = fs::read_to_string(&path)?;
  let stored: StoredSession = serde_json::from_str(&content)?;
  if stored.token.is_empty() {
    return Ok(None);
  }

  Ok(Some(SessionContext::new(stored.token, stored.principal)))
}

/// Forget the stored session
pub fn clear() -> Result<()> {
  let path = session_path()?;
  if path.exists() {
    fs::remove_file(&path)?;
  }
  Ok(())
}
