use thiserror::Error;

use crate::model::{ScanKind, ScanRecord};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
  #[error("a scan is already in flight")]
  ScanInFlight,

  #[error("no scan is in flight")]
  NoScanInFlight,

  #[error("{found} record in a {expected} result set")]
  KindMismatch { expected: ScanKind, found: ScanKind },

  #[error("selection index {index} out of range for {len} records")]
  IndexOutOfRange { index: usize, len: usize },
}

/// The single active scan session: current result set, selection, and the
/// in-flight flag that serializes scans.
///
/// Rankings are a pure function of the current records and kind, recomputed
/// on every read. The record set is only ever replaced wholesale, by one
/// paired `begin_scan`/`complete_scan` (or `abort_scan`) transition.
#[derive(Debug)]
pub struct ScanSessionStore {
  kind: Option<ScanKind>,
  records: Vec<ScanRecord>,
  selected: Option<usize>,
  in_flight: bool,
  status: String,
}

impl Default for ScanSessionStore {
  fn default() -> Self {
    Self::new()
  }
}

impl ScanSessionStore {
  pub fn new() -> Self {
    Self {
      kind: None,
      records: Vec::new(),
      selected: None,
      in_flight: false,
      status: "Idle".to_string(),
    }
  }

  pub fn kind(&self) -> Option<ScanKind> {
    self.kind
  }

  pub fn records(&self) -> &[ScanRecord] {
    &self.records
  }

  pub fn selected(&self) -> Option<usize> {
    self.selected
  }

  pub fn is_in_flight(&self) -> bool {
    self.in_flight
  }

  /// User-visible status line for the session
  pub fn status(&self) -> &str {
    &self.status
  }

  /// Start a scan of the given kind. A second call while one is in flight
  /// is rejected, not queued; the running scan is unaffected.
  pub fn begin_scan(&mut self, kind: ScanKind) -> Result<(), SessionError> {
    if self.in_flight {
      return Err(SessionError::ScanInFlight);
    }

    self.in_flight = true;
    self.kind = Some(kind);
    self.selected = None;
    self.status = format!("Scanning {kind}...");
    Ok(())
  }

  /// Apply a completed scan's result set, replacing the session's records
  /// wholesale and returning the store to idle. Every record must carry the
  /// session's kind; on mismatch nothing is mutated.
  pub fn complete_scan(&mut self, records: Vec<ScanRecord>) -> Result<(), SessionError> {
    if !self.in_flight {
      return Err(SessionError::NoScanInFlight);
    }

    let Some(expected) = self.kind else {
      return Err(SessionError::NoScanInFlight);
    };
    if let Some(found) = records.iter().map(ScanRecord::kind).find(|k| *k != expected) {
      return Err(SessionError::KindMismatch { expected, found });
    }

    self.records = records;
    self.in_flight = false;
    self.selected = None;
    self.status = format!("{expected} scan complete");
    Ok(())
  }

  /// The paired failure path for `begin_scan`: clears the in-flight flag so
  /// the store can never wedge busy, empties the record set, and surfaces
  /// the reason as the session status.
  pub fn abort_scan(&mut self, reason: impl Into<String>) -> Result<(), SessionError> {
    if !self.in_flight {
      return Err(SessionError::NoScanInFlight);
    }

    self.records.clear();
    self.in_flight = false;
    self.selected = None;
    self.status = reason.into();
    Ok(())
  }

  /// Select a record by index into the current result set
  pub fn select(&mut self, index: usize) -> Result<(), SessionError> {
    if index >= self.records.len() {
      return Err(SessionError::IndexOutOfRange { index, len: self.records.len() });
    }

    self.selected = Some(index);
    Ok(())
  }

  /// The record with the strongest signal for the session's kind: maximum
  /// proximity for bluetooth, maximum dBm (least negative) for wifi and
  /// zigbee. Ties break to the first occurrence in scan order.
  pub fn best_record(&self) -> Option<&ScanRecord> {
    let mut best: Option<&ScanRecord> = None;
    for record in &self.records {
      let stronger = match best {
        Some(current) => record.strength() > current.strength(),
        None => true,
      };
      if stronger {
        best = Some(record);
      }
    }
    best
  }

  /// Logout path: back to the empty idle session
  pub fn reset(&mut self) {
    *self = Self::new();
  }
}
