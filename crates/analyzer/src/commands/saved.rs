use anyhow::Result;
use colored::*;
use std::fs;
use std::path::PathBuf;

use relay::client;
use relay::error::RelayError;
use relay::registry::{PersistenceApi, RemoteScanRegistry};
use sweep::report;

use super::{confirm, drop_rejected_session, require_session};

/// Refresh, translating a rejected token into a forced logout
async fn refreshed_registry(
) -> Result<(RemoteScanRegistry<client::HttpRelay>, relay::auth::SessionContext)> {
  let mut ctx = require_session()?;
  let mut registry = RemoteScanRegistry::new(client::get_relay()?);

  match registry.refresh(&mut ctx).await {
    Ok(()) => Ok((registry, ctx)),
    Err(err @ RelayError::Unauthorized) => {
      drop_rejected_session()?;
      Err(err.into())
    }
    Err(err) => Err(err.into()),
  }
}

pub async fn list() -> Result<()> {
  let (registry, _ctx) = refreshed_registry().await?;

  if registry.saved().is_empty() {
    println!("No saved scans yet");
    return Ok(());
  }

  for scan in registry.saved() {
    println!(
      "{:<26} {:<10} {:<28} {:>5}  {}",
      scan.id.yellow(),
      scan.kind.label(),
      scan.name,
      scan.count,
      scan.timestamp.format("%Y-%m-%d %H:%M")
    );
  }
  Ok(())
}

pub async fn remove(id: &str, force: bool) -> Result<()> {
  if !force && !confirm("Delete this scan permanently?")? {
    println!("Aborted");
    return Ok(());
  }

  let (mut registry, mut ctx) = refreshed_registry().await?;
  match registry.remove(&mut ctx, id).await {
    Ok(()) => {
      println!("{} Deleted {}", "✓".green(), id.yellow());
      Ok(())
    }
    Err(err) => {
      // The optimistic removal was rolled back; the entry is still listed
      println!("{} Failed to delete {}; entry restored", "✗".red(), id.yellow());
      Err(err.into())
    }
  }
}

pub async fn export(id: &str, out: Option<PathBuf>, remote: bool) -> Result<()> {
  let (registry, ctx) = refreshed_registry().await?;

  let filename = match out {
    Some(path) => path,
    None => PathBuf::from(format!("{}.html", registry.export_descriptor(id)?)),
  };

  let html = if remote {
    registry.api().fetch_saved_content(ctx.token(), id).await?
  } else {
    let scan = registry.api().fetch_saved(ctx.token(), id).await?;
    report::render_saved(&scan)?
  };
  fs::write(&filename, html)?;
  tracing::debug!(path = %filename.display(), "report written");

  println!("{} Exported {} -> {}", "✓".green(), id.yellow(), filename.display());
  Ok(())
}
