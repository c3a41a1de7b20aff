use anyhow::Result;
use serial_test::serial;
use std::env;
use tempfile::TempDir;

use analyzer::session_file;
use relay::auth::{Principal, SessionContext};

fn setup_temp_home() -> TempDir {
  let temp_dir = TempDir::new().unwrap();
  env::set_var("SIGNAL_ANALYZER_HOME", temp_dir.path());
  temp_dir
}

fn session() -> SessionContext {
  let principal = Principal { id: 42, email: "field@example.com".to_string(), created_at: None };
  SessionContext::new("tok-xyz", principal)
}

#[test]
#[serial]
fn test_store_and_load_round_trip() -> Result<()> {
  let _temp = setup_temp_home();

  session_file::store(&session())?;
  let loaded = session_file::load()?.expect("stored session should load");

  assert_eq!(loaded.token(), "tok-xyz");
  assert_eq!(loaded.principal().email, "field@example.com");
  assert_eq!(loaded.principal().id, 42);
  Ok(())
}

#[test]
#[serial]
fn test_load_without_stored_session() -> Result<()> {
  let _temp = setup_temp_home();
  assert!(session_file::load()?.is_none());
  Ok(())
}

#[test]
#[serial]
fn test_clear_removes_session() -> Result<()> {
  let _temp = setup_temp_home();

  session_file::store(&session())?;
  session_file::clear()?;
  assert!(session_file::load()?.is_none());

  // Clearing twice is fine
  session_file::clear()?;
  Ok(())
}

#[test]
#[serial]
fn test_invalidated_session_does_not_load() -> Result<()> {
  let _temp = setup_temp_home();

  let mut ctx = session();
  ctx.invalidate();
  session_file::store(&ctx)?;

  assert!(session_file::load()?.is_none());
  Ok(())
}

#[cfg(unix)]
#[test]
#[serial]
fn test_session_file_is_owner_only() -> Result<()> {
  use std::os::unix::fs::PermissionsExt;

  let _temp = setup_temp_home();
  session_file::store(&session())?;

  let path = session_file::analyzer_home()?.join("session.json");
  let mode = std::fs::metadata(path)?.permissions().mode();
  assert_eq!(mode & 0o777, 0o600);
  Ok(())
}
