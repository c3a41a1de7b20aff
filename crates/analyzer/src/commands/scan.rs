use anyhow::Result;
use colored::*;

use relay::client;
use relay::registry::RemoteScanRegistry;
use sweep::model::{ScanKind, ScanRecord};
use sweep::probe::run_scan;
use sweep::session::ScanSessionStore;

use super::{drop_rejected_session, require_session};

fn strength_label(record: &ScanRecord) -> String {
  match record {
    ScanRecord::Wifi(n) => format!("{} dBm", n.signal_dbm),
    ScanRecord::Bluetooth(d) => format!("{}%", d.proximity),
    ScanRecord::Zigbee(d) => format!("{} dBm", d.signal_dbm),
  }
}

fn print_results(store: &ScanSessionStore) {
  for (i, record) in store.records().iter().enumerate() {
    let verdict = match record {
      ScanRecord::Wifi(n) => n.security.as_deref().map(sweep::signal::security_rating),
      _ => None,
    };
    println!(
      "{:>3}  {:<40} {:>10}  {}",
      i + 1,
      record.identity(),
      strength_label(record),
      verdict.unwrap_or("")
    );
  }

  if let Some(best) = store.best_record() {
    println!("{} Best signal: {}", "⭐".yellow(), best.identity().cyan());
  }
}

pub async fn execute(kind: ScanKind, save: Option<String>) -> Result<()> {
  let relay = client::get_relay()?;
  let mut store = ScanSessionStore::new();

  println!("Scanning {kind}...");
  match run_scan(&mut store, &relay, kind).await {
    Ok(count) => {
      println!("{} {} ({} found)", "✓".green(), store.status(), count);
    }
    Err(err) => {
      println!("{} {}", "✗".red(), store.status());
      return Err(err);
    }
  }

  print_results(&store);

  if let Some(name) = save {
    if store.records().is_empty() {
      println!("{} No scan data to save", "✗".red());
      return Ok(());
    }

    let mut ctx = require_session()?;
    let mut registry = RemoteScanRegistry::new(relay);
    match registry.save(&mut ctx, kind, &name, store.records()).await {
      Ok(created) => {
        println!("{} Saved as {} (id {})", "✓".green(), name.cyan(), created.id.yellow());
      }
      Err(err) if err.is_unauthorized() => {
        store.reset();
        drop_rejected_session()?;
        return Err(err.into());
      }
      Err(err) => return Err(err.into()),
    }
  }

  Ok(())
}
