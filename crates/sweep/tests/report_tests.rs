use anyhow::Result;
use chrono::{TimeZone, Utc};
use serde_json::json;
use sweep::model::{BleDevice, SavedScan, ScanKind, ScanRecord, WifiNetwork};
use sweep::report;

#[cfg(test)]
mod filename_tests {
  use super::*;

  #[test]
  fn test_export_filename_convention() {
    let ts = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
    assert_eq!(report::export_filename(ScanKind::Bluetooth, ts), "bluetooth-2024-03-05.html");
    assert_eq!(report::export_filename(ScanKind::Wifi, ts), "wifi-2024-03-05.html");
    assert_eq!(report::export_stem(ScanKind::Zigbee, ts), "zigbee-2024-03-05");
  }
}

#[cfg(test)]
mod render_tests {
  use super::*;

  #[test]
  fn test_wifi_report_has_headers_and_rows() {
    let mut network = WifiNetwork::new("lab-2g", "AA:BB:CC:DD:EE:01", -48);
    network.channel = Some("6".to_string());
    network.security = Some("WPA2-Personal".to_string());
    let records = vec![ScanRecord::Wifi(network)];

    let ts = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
    let html = report::render_report(ScanKind::Wifi, &records, ts);

    assert!(html.contains("<th>SSID</th>"));
    assert!(html.contains("<th>Signal (dBm)</th>"));
    assert!(html.contains("<td>lab-2g</td>"));
    assert!(html.contains("<td>-48</td>"));
    assert!(html.contains("Wi-Fi Scan"));
  }

  #[test]
  fn test_bluetooth_report_uses_proximity_column() {
    let records = vec![ScanRecord::Bluetooth(BleDevice::new("buds", "dev-1", 73))];
    let ts = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
    let html = report::render_report(ScanKind::Bluetooth, &records, ts);

    assert!(html.contains("<th>Proximity (%)</th>"));
    assert!(html.contains("<td>73</td>"));
    assert!(!html.contains("<th>SSID</th>"));
  }

  #[test]
  fn test_report_escapes_markup_in_names() {
    let records =
      vec![ScanRecord::Wifi(WifiNetwork::new("<script>oops", "AA:BB:CC:DD:EE:02", -60))];
    let ts = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
    let html = report::render_report(ScanKind::Wifi, &records, ts);

    assert!(html.contains("&lt;script&gt;oops"));
    assert!(!html.contains("<script>oops"));
  }

  #[test]
  fn test_render_saved_decodes_snapshot_items() -> Result<()> {
    let scan = SavedScan {
      id: "abc123".to_string(),
      name: "office sweep".to_string(),
      kind: ScanKind::Bluetooth,
      timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
      count: 1,
      items: vec![json!({
        "Device Name": "thermostat",
        "Device ID": "dev-9",
        "Proximity (%)": 55,
        "Device Category": "🔵 Generic BLE"
      })],
    };

    let html = report::render_saved(&scan)?;
    assert!(html.contains("<td>thermostat</td>"));
    assert!(html.contains("<td>55</td>"));
    Ok(())
  }
}

#[cfg(test)]
mod decode_tests {
  use super::*;

  #[test]
  fn test_records_are_kind_directed() -> Result<()> {
    // Wifi and zigbee share the "Signal (dBm)" key; the kind decides the shape
    let value = json!({
      "Name": "Smart Plug_03",
      "IEEE Address": "00:12:4B:00:AA:BB:CC:DD",
      "Signal (dBm)": -61,
      "LQI": "180"
    });

    let record = ScanRecord::from_value(ScanKind::Zigbee, value)?;
    assert_eq!(record.kind(), ScanKind::Zigbee);
    assert_eq!(record.identity(), "Smart Plug_03");
    assert_eq!(record.strength(), -61.0);
    Ok(())
  }

  #[test]
  fn test_unknown_fields_survive_in_extra() -> Result<()> {
    let value = json!({
      "Name": "lab-5g",
      "BSSID": "AA:BB:CC:DD:EE:03",
      "Signal (dBm)": -52,
      "Vendor": "Acme"
    });

    let record = ScanRecord::from_value(ScanKind::Wifi, value)?;
    let ScanRecord::Wifi(network) = &record else {
      panic!("expected a wifi record");
    };
    assert_eq!(network.extra.get("Vendor"), Some(&json!("Acme")));

    // And they round-trip back onto the wire
    let encoded = serde_json::to_value(&record)?;
    assert_eq!(encoded.get("Vendor"), Some(&json!("Acme")));
    Ok(())
  }

  #[test]
  fn test_decoding_derives_missing_display_fields() -> Result<()> {
    let value = json!({
      "Name": "lab-2g",
      "BSSID": "AA:BB:CC:DD:EE:04",
      "Signal (dBm)": -60,
      "Channel": "6"
    });

    let record = ScanRecord::from_value(ScanKind::Wifi, value)?;
    let ScanRecord::Wifi(network) = &record else {
      panic!("expected a wifi record");
    };

    assert_eq!(network.signal_percent.as_deref(), Some("50%"));
    assert_eq!(network.band.as_deref(), Some("2.4 GHz"));
    assert!(network.distance.as_deref().unwrap().ends_with(" m"));
    Ok(())
  }

  #[test]
  fn test_decoding_keeps_scanner_supplied_fields() -> Result<()> {
    let value = json!({
      "Name": "lab-2g",
      "BSSID": "AA:BB:CC:DD:EE:05",
      "Signal (dBm)": -60,
      "Signal (%)": "61%"
    });

    let record = ScanRecord::from_value(ScanKind::Wifi, value)?;
    let ScanRecord::Wifi(network) = &record else {
      panic!("expected a wifi record");
    };
    assert_eq!(network.signal_percent.as_deref(), Some("61%"));
    Ok(())
  }

  #[test]
  fn test_malformed_record_reports_index() {
    let values = vec![
      json!({"Device Name": "ok", "Device ID": "d1", "Proximity (%)": 10}),
      json!({"Device Name": "missing proximity"}),
    ];

    let err = ScanRecord::from_values(ScanKind::Bluetooth, values).unwrap_err();
    assert!(err.to_string().contains("index 1"));
  }
}
