use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::model::{SavedScan, ScanKind, ScanRecord};

/// Filename-safe descriptor for an exported scan: `{kind_label}-{iso_date}`
pub fn export_stem(kind: ScanKind, timestamp: DateTime<Utc>) -> String {
  format!("{}-{}", kind.label(), timestamp.format("%Y-%m-%d"))
}

/// The exported document's filename: `{kind_label}-{iso_date}.html`
pub fn export_filename(kind: ScanKind, timestamp: DateTime<Utc>) -> String {
  format!("{}.html", export_stem(kind, timestamp))
}

fn escape(text: &str) -> String {
  text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn cell(value: &Option<String>) -> String {
  escape(value.as_deref().unwrap_or(""))
}

fn headers(kind: ScanKind) -> &'static [&'static str] {
  match kind {
    ScanKind::Wifi => {
      &["#", "SSID", "BSSID", "Signal (dBm)", "Signal %", "Channel", "Distance", "Security"]
    }
    ScanKind::Bluetooth => {
      &["#", "Device Name", "Device ID", "Proximity (%)", "Category", "Stability", "Pairing"]
    }
    ScanKind::Zigbee => &[
      "#",
      "Device Name",
      "IEEE Address",
      "Network Addr",
      "RSSI",
      "LQI",
      "Distance",
      "PAN ID",
      "Channel",
      "Device Type",
      "Security",
      "Battery",
    ],
  }
}

fn row(index: usize, record: &ScanRecord) -> String {
  let cells: Vec<String> = match record {
    ScanRecord::Wifi(n) => vec![
      index.to_string(),
      escape(&n.ssid),
      escape(&n.bssid),
      n.signal_dbm.to_string(),
      cell(&n.signal_percent),
      cell(&n.channel),
      cell(&n.distance),
      cell(&n.security),
    ],
    ScanRecord::Bluetooth(d) => vec![
      index.to_string(),
      escape(&d.name),
      escape(&d.device_id),
      d.proximity.to_string(),
      cell(&d.category),
      cell(&d.stability),
      cell(&d.pairing),
    ],
    ScanRecord::Zigbee(d) => vec![
      index.to_string(),
      escape(&d.name),
      escape(&d.ieee_address),
      cell(&d.network_address),
      d.signal_dbm.to_string(),
      cell(&d.lqi),
      cell(&d.distance),
      cell(&d.pan_id),
      cell(&d.channel),
      cell(&d.device_type),
      cell(&d.security),
      cell(&d.battery),
    ],
  };

  let tds: String = cells.into_iter().map(|c| format!("<td>{c}</td>")).collect();
  format!("<tr>{tds}</tr>\n")
}

/// Render the current record sequence as a self-contained HTML report.
/// Pure and synchronous; no remote call.
pub fn render_report(kind: ScanKind, records: &[ScanRecord], generated_at: DateTime<Utc>) -> String {
  let ths: String = headers(kind).iter().map(|h| format!("<th>{h}</th>")).collect();
  let rows: String = records.iter().enumerate().map(|(i, r)| row(i + 1, r)).collect();
  let generated = generated_at.format("%d %b %Y, %H:%M:%S UTC");

  format!(
    "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
     <title>Signal Analyzer — Scan Report</title>\n\
     <style>\n\
     body{{font-family:Arial;margin:32px}}\n\
     table{{width:100%;border-collapse:collapse}}\n\
     th,td{{padding:10px;border-bottom:1px solid #ddd}}\n\
     th{{background:#f3f4f6}}\n\
     </style>\n</head>\n<body>\n\
     <h1>📡 Signal Analyzer — {kind} Scan</h1>\n\
     <p>Generated: {generated}</p>\n\
     <table>\n<thead><tr>{ths}</tr></thead>\n<tbody>\n{rows}</tbody>\n</table>\n\
     <p style=\"margin-top:20px;color:#666\">Generated by Signal Analyzer</p>\n\
     </body>\n</html>\n"
  )
}

/// Render a persisted snapshot, decoding its items first
pub fn render_saved(scan: &SavedScan) -> Result<String> {
  let records = scan.records()?;
  Ok(render_report(scan.kind, &records, scan.timestamp))
}
