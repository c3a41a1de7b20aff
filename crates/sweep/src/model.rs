use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::signal;

/// The three radio families a scan can target. Determines the record shape
/// and which field ranking compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanKind {
  Wifi,
  Bluetooth,
  Zigbee,
}

impl ScanKind {
  /// Lowercase label, as the remote authority stores it
  pub fn label(&self) -> &'static str {
    match self {
      ScanKind::Wifi => "wifi",
      ScanKind::Bluetooth => "bluetooth",
      ScanKind::Zigbee => "zigbee",
    }
  }

  /// Human-facing name for status lines and report titles
  pub fn display_name(&self) -> &'static str {
    match self {
      ScanKind::Wifi => "Wi-Fi",
      ScanKind::Bluetooth => "Bluetooth",
      ScanKind::Zigbee => "Zigbee",
    }
  }
}

impl fmt::Display for ScanKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.display_name())
  }
}

/// One detected Wi-Fi network. Wire keys follow the scanner's output shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WifiNetwork {
  #[serde(rename = "Name")]
  pub ssid: String,
  #[serde(rename = "BSSID")]
  pub bssid: String,
  #[serde(rename = "Signal (dBm)")]
  pub signal_dbm: i32,
  #[serde(rename = "Signal (%)", skip_serializing_if = "Option::is_none")]
  pub signal_percent: Option<String>,
  #[serde(rename = "Channel", skip_serializing_if = "Option::is_none")]
  pub channel: Option<String>,
  #[serde(rename = "Band", skip_serializing_if = "Option::is_none")]
  pub band: Option<String>,
  #[serde(rename = "Distance", skip_serializing_if = "Option::is_none")]
  pub distance: Option<String>,
  #[serde(rename = "Security Type", skip_serializing_if = "Option::is_none")]
  pub security: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl WifiNetwork {
  pub fn new(ssid: impl Into<String>, bssid: impl Into<String>, signal_dbm: i32) -> Self {
    Self {
      ssid: ssid.into(),
      bssid: bssid.into(),
      signal_dbm,
      signal_percent: None,
      channel: None,
      band: None,
      distance: None,
      security: None,
      extra: Map::new(),
    }
  }

  /// Fill the display fields a sparse scanner left out, derived from the
  /// raw reading. Present values are never overwritten.
  pub fn with_derived_fields(mut self) -> Self {
    if self.signal_percent.is_none() {
      self.signal_percent = Some(format!("{}%", signal::rssi_to_percent(self.signal_dbm)));
    }

    let freq = self
      .channel
      .as_deref()
      .and_then(|c| c.parse().ok())
      .map(signal::channel_to_freq_mhz);
    if let Some(freq) = freq {
      if self.band.is_none() {
        self.band = Some(signal::band(freq).to_string());
      }
      if self.distance.is_none() {
        let meters = signal::estimate_distance_indoor(self.signal_dbm, freq);
        self.distance = Some(signal::format_distance(meters));
      }
    }

    self
  }
}

/// One detected BLE device. Proximity is a 0-100 percentage, not dBm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BleDevice {
  #[serde(rename = "Device Name")]
  pub name: String,
  #[serde(rename = "Device ID")]
  pub device_id: String,
  #[serde(rename = "Proximity (%)")]
  pub proximity: u8,
  #[serde(rename = "Device Category", skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  #[serde(rename = "Advertised Stability", skip_serializing_if = "Option::is_none")]
  pub stability: Option<String>,
  #[serde(rename = "Pairing Required", skip_serializing_if = "Option::is_none")]
  pub pairing: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl BleDevice {
  pub fn new(name: impl Into<String>, device_id: impl Into<String>, proximity: u8) -> Self {
    Self {
      name: name.into(),
      device_id: device_id.into(),
      proximity,
      category: None,
      stability: None,
      pairing: None,
      extra: Map::new(),
    }
  }
}

/// One detected Zigbee device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZigbeeDevice {
  #[serde(rename = "Name")]
  pub name: String,
  #[serde(rename = "IEEE Address")]
  pub ieee_address: String,
  #[serde(rename = "Signal (dBm)")]
  pub signal_dbm: i32,
  #[serde(rename = "Network Address", skip_serializing_if = "Option::is_none")]
  pub network_address: Option<String>,
  #[serde(rename = "LQI", skip_serializing_if = "Option::is_none")]
  pub lqi: Option<String>,
  #[serde(rename = "Distance", skip_serializing_if = "Option::is_none")]
  pub distance: Option<String>,
  #[serde(rename = "PAN ID", skip_serializing_if = "Option::is_none")]
  pub pan_id: Option<String>,
  #[serde(rename = "Channel", skip_serializing_if = "Option::is_none")]
  pub channel: Option<String>,
  #[serde(rename = "Device Type", skip_serializing_if = "Option::is_none")]
  pub device_type: Option<String>,
  #[serde(rename = "Security", skip_serializing_if = "Option::is_none")]
  pub security: Option<String>,
  #[serde(rename = "Battery Level", skip_serializing_if = "Option::is_none")]
  pub battery: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl ZigbeeDevice {
  pub fn new(name: impl Into<String>, ieee_address: impl Into<String>, signal_dbm: i32) -> Self {
    Self {
      name: name.into(),
      ieee_address: ieee_address.into(),
      signal_dbm,
      network_address: None,
      lqi: None,
      distance: None,
      pan_id: None,
      channel: None,
      device_type: None,
      security: None,
      battery: None,
      extra: Map::new(),
    }
  }

  /// Derive the 2.4 GHz distance estimate when the scanner omitted it
  pub fn with_derived_fields(mut self) -> Self {
    if self.distance.is_none() {
      let meters = signal::estimate_distance_zigbee(self.signal_dbm, 2400);
      self.distance = Some(signal::format_distance(meters));
    }
    self
  }
}

/// A single detected entity, tagged by the kind of scan that produced it.
///
/// Serialization is untagged (the flat dict the scanners emit); wifi and
/// zigbee payloads share wire keys, so deserialization must be directed by
/// kind via `from_value` rather than guessed.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ScanRecord {
  Wifi(WifiNetwork),
  Bluetooth(BleDevice),
  Zigbee(ZigbeeDevice),
}

impl ScanRecord {
  pub fn kind(&self) -> ScanKind {
    match self {
      ScanRecord::Wifi(_) => ScanKind::Wifi,
      ScanRecord::Bluetooth(_) => ScanKind::Bluetooth,
      ScanRecord::Zigbee(_) => ScanKind::Zigbee,
    }
  }

  /// Display-distinct label within one result set. Not globally unique.
  pub fn identity(&self) -> String {
    match self {
      ScanRecord::Wifi(n) => format!("{} ({})", n.ssid, n.bssid),
      ScanRecord::Bluetooth(d) => d.name.clone(),
      ScanRecord::Zigbee(d) => d.name.clone(),
    }
  }

  /// The ranking metric for this record's kind: proximity percentage for
  /// bluetooth, signed dBm for wifi/zigbee. Larger is stronger in both
  /// semantics; values are only comparable within one kind.
  pub fn strength(&self) -> f64 {
    match self {
      ScanRecord::Wifi(n) => f64::from(n.signal_dbm),
      ScanRecord::Bluetooth(d) => f64::from(d.proximity),
      ScanRecord::Zigbee(d) => f64::from(d.signal_dbm),
    }
  }

  /// Decode one raw scanner dict into the record shape for `kind`,
  /// deriving the display fields sparse scanners omit
  pub fn from_value(kind: ScanKind, value: Value) -> Result<Self> {
    let record = match kind {
      ScanKind::Wifi => {
        let network: WifiNetwork = serde_json::from_value(value)?;
        ScanRecord::Wifi(network.with_derived_fields())
      }
      ScanKind::Bluetooth => ScanRecord::Bluetooth(serde_json::from_value(value)?),
      ScanKind::Zigbee => {
        let device: ZigbeeDevice = serde_json::from_value(value)?;
        ScanRecord::Zigbee(device.with_derived_fields())
      }
    };
    Ok(record)
  }

  /// Decode a whole result set, failing on the first malformed entry
  pub fn from_values(kind: ScanKind, values: Vec<Value>) -> Result<Vec<Self>> {
    values
      .into_iter()
      .enumerate()
      .map(|(i, value)| {
        Self::from_value(kind, value)
          .map_err(|e| anyhow!("malformed {} record at index {}: {}", kind.label(), i, e))
      })
      .collect()
  }
}

/// A named, timestamped, remotely persisted snapshot of a completed scan.
/// The id is assigned by the remote authority, never by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedScan {
  pub id: String,
  pub name: String,
  #[serde(default = "SavedScan::default_kind")]
  pub kind: ScanKind,
  pub timestamp: DateTime<Utc>,
  #[serde(default)]
  pub count: usize,
  /// Present on single-scan fetches, omitted from list responses
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub items: Vec<Value>,
}

impl SavedScan {
  // Early saved scans predate the kind field
  fn default_kind() -> ScanKind {
    ScanKind::Wifi
  }

  /// Decode the snapshot items into typed records
  pub fn records(&self) -> Result<Vec<ScanRecord>> {
    ScanRecord::from_values(self.kind, self.items.clone())
  }
}
