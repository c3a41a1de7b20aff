//! Signal-strength conversions and propagation estimates shared by the
//! record normalizers and report rendering.

/// Map a 0-100 link quality percentage onto dBm, clamped to [-95, -30]
pub fn percent_to_dbm(quality: u32) -> i32 {
  if quality >= 100 {
    return -30;
  }
  if quality <= 1 {
    return -90;
  }
  let dbm = -30.0 - (100 - quality) as f64 * 0.55;
  dbm.clamp(-95.0, -30.0).round() as i32
}

/// Map an RSSI reading onto a 0-100 percentage
pub fn rssi_to_percent(rssi: i32) -> u8 {
  if rssi >= -30 {
    return 100;
  }
  if rssi <= -90 {
    return 0;
  }
  ((rssi + 90) as f64 / 60.0 * 100.0) as u8
}

/// Center frequency in MHz for a Wi-Fi channel (2.4 GHz for 1-14, 5 GHz above)
pub fn channel_to_freq_mhz(channel: u16) -> u32 {
  let c = u32::from(channel);
  if (1..=14).contains(&channel) {
    2407 + c * 5
  } else {
    5000 + c * 5
  }
}

/// Free-space path loss distance estimate for indoor Wi-Fi, clamped to
/// [0.2, 500] meters
pub fn estimate_distance_indoor(rssi_dbm: i32, freq_mhz: u32) -> f64 {
  let exponent = (27.55 - 20.0 * f64::from(freq_mhz).log10() + f64::from(rssi_dbm).abs()) / 20.0;
  10f64.powf(exponent).clamp(0.2, 500.0)
}

/// Log-distance path loss estimate for Zigbee radios, clamped to
/// [0.1, 100] meters. Path loss exponent 3.5 at 2.4 GHz, 2.8 sub-GHz.
pub fn estimate_distance_zigbee(rssi_dbm: i32, freq_mhz: u32) -> f64 {
  let tx_power = -25.0;
  let n = if freq_mhz > 900 { 3.5 } else { 2.8 };
  let distance = 10f64.powf((tx_power - f64::from(rssi_dbm)) / (10.0 * n));
  distance.clamp(0.1, 100.0)
}

/// Display form for a distance estimate
pub fn format_distance(meters: f64) -> String {
  format!("{meters:.2} m")
}

/// Frequency band bucket for display
pub fn band(freq_mhz: u32) -> &'static str {
  if freq_mhz < 3000 {
    "2.4 GHz"
  } else if freq_mhz < 6000 {
    "5 GHz"
  } else {
    "6+ GHz"
  }
}

/// Coarse security verdict for a Wi-Fi auth string
pub fn security_rating(security: &str) -> &'static str {
  let s = security.to_uppercase();
  if s.contains("WPA3") {
    "✅ Highly Secure"
  } else if s.contains("WPA2") {
    "🔒 Secure"
  } else if s.contains("WPA") {
    "⚠️ Moderate"
  } else if s.contains("OPEN") || s.contains("NONE") {
    "🚫 Risky (Open)"
  } else if s.contains("WEP") {
    "⚠️ Weak (WEP)"
  } else {
    "❓ Unknown"
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_percent_to_dbm_clamps() {
    assert_eq!(percent_to_dbm(100), -30);
    assert_eq!(percent_to_dbm(150), -30);
    assert_eq!(percent_to_dbm(1), -90);
    assert_eq!(percent_to_dbm(0), -90);
    let mid = percent_to_dbm(50);
    assert!((-95..=-30).contains(&mid));
  }

  #[test]
  fn test_rssi_to_percent_clamps() {
    assert_eq!(rssi_to_percent(-30), 100);
    assert_eq!(rssi_to_percent(-10), 100);
    assert_eq!(rssi_to_percent(-90), 0);
    assert_eq!(rssi_to_percent(-120), 0);
    assert_eq!(rssi_to_percent(-60), 50);
  }

  #[test]
  fn test_channel_to_freq() {
    assert_eq!(channel_to_freq_mhz(1), 2412);
    assert_eq!(channel_to_freq_mhz(14), 2477);
    assert_eq!(channel_to_freq_mhz(36), 5180);
  }

  #[test]
  fn test_distance_estimates_clamp() {
    let near = estimate_distance_indoor(-30, 2412);
    let far = estimate_distance_indoor(-95, 2412);
    assert!(near >= 0.2);
    assert!(far <= 500.0);
    assert!(near < far);

    let zb = estimate_distance_zigbee(-60, 2400);
    assert!((0.1..=100.0).contains(&zb));
  }

  #[test]
  fn test_band_buckets() {
    assert_eq!(band(2412), "2.4 GHz");
    assert_eq!(band(5180), "5 GHz");
    assert_eq!(band(6100), "6+ GHz");
  }

  #[test]
  fn test_security_rating() {
    assert_eq!(security_rating("WPA3-SAE"), "✅ Highly Secure");
    assert_eq!(security_rating("WPA2-Personal"), "🔒 Secure");
    assert_eq!(security_rating("Open"), "🚫 Risky (Open)");
    assert_eq!(security_rating("gibberish"), "❓ Unknown");
  }
}
