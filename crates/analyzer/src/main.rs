use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use analyzer::commands;
use sweep::model::ScanKind;

#[derive(Parser)]
#[command(name = "analyzer")]
#[command(
  about = "Signal Analyzer - wireless scanning & signal intelligence\nTriggers Wi-Fi, BLE, and Zigbee sweeps and manages saved scan sessions"
)]
#[command(version)]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,
}

/// Radio family to sweep
#[derive(Clone, Copy, ValueEnum)]
enum Band {
  Wifi,
  Ble,
  Zigbee,
}

impl From<Band> for ScanKind {
  fn from(band: Band) -> Self {
    match band {
      Band::Wifi => ScanKind::Wifi,
      Band::Ble => ScanKind::Bluetooth,
      Band::Zigbee => ScanKind::Zigbee,
    }
  }
}

#[derive(Subcommand)]
enum Commands {
  /// Run a one-shot scan and show ranked results
  Scan {
    #[arg(value_enum)]
    band: Band,
    /// Persist the results under this name after the scan completes
    #[arg(short, long)]
    save: Option<String>,
  },
  /// Create an account on the scan authority
  Signup {
    /// Account email address
    email: String,
  },
  /// Log in and store the session token
  Login {
    /// Account email address
    email: String,
  },
  /// Drop the stored session
  Logout,
  /// Show the logged-in account
  Whoami,
  /// Work with saved scans
  Saved {
    #[command(subcommand)]
    command: SavedCommands,
  },
}

#[derive(Subcommand)]
enum SavedCommands {
  /// List saved scans, newest first
  List,
  /// Delete a saved scan
  Remove {
    /// Id of the saved scan
    id: String,
    /// Skip confirmation prompt
    #[arg(short, long)]
    force: bool,
  },
  /// Export a saved scan as an HTML report
  Export {
    /// Id of the saved scan
    id: String,
    /// Output path (defaults to {kind}-{date}.html in the current directory)
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Download the authority's rendered document instead of rendering locally
    #[arg(long)]
    remote: bool,
  },
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug,hyper=info,reqwest=info")
  } else {
    EnvFilter::new("warn")
  };
  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

  match cli.command {
    Commands::Scan { band, save } => commands::scan::execute(band.into(), save).await,
    Commands::Signup { email } => commands::account::signup(&email).await,
    Commands::Login { email } => commands::account::login(&email).await,
    Commands::Logout => commands::account::logout(),
    Commands::Whoami => commands::account::whoami().await,
    Commands::Saved { command } => match command {
      SavedCommands::List => commands::saved::list().await,
      SavedCommands::Remove { id, force } => commands::saved::remove(&id, force).await,
      SavedCommands::Export { id, out, remote } => commands::saved::export(&id, out, remote).await,
    },
  }
}
