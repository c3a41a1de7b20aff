use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;

use crate::model::{ScanKind, ScanRecord};
use crate::session::ScanSessionStore;

/// The scan trigger boundary. The collaborator behind it owns the radios,
/// timeouts, and cancellation; its errors are surfaced verbatim.
#[async_trait]
pub trait ScanProbe {
  async fn perform_scan(&self, kind: ScanKind) -> Result<Vec<ScanRecord>>;
}

/// Drive one begin/complete pair against the store: begin, issue the probe
/// call, then either apply the result set or abort. The store returns to
/// idle on both paths; a probe failure is recorded as the session status and
/// propagated to the caller. Returns the number of records on success.
pub async fn run_scan<P>(
  store: &mut ScanSessionStore,
  probe: &P,
  kind: ScanKind,
) -> Result<usize>
where
  P: ScanProbe + Sync + ?Sized,
{
  store.begin_scan(kind)?;
  tracing::debug!(kind = kind.label(), "scan started");

  match probe.perform_scan(kind).await {
    Ok(records) => {
      let count = records.len();
      store.complete_scan(records)?;
      tracing::debug!(kind = kind.label(), count, "scan complete");
      Ok(count)
    }
    Err(err) => {
      tracing::warn!(kind = kind.label(), error = %err, "scan failed");
      store.abort_scan(format!("{kind} scan failed"))?;
      Err(err)
    }
  }
}

/// Canned probe for tests
pub struct MockProbe {
  pub responses: HashMap<ScanKind, Vec<ScanRecord>>,
  pub fail_on: Vec<ScanKind>,
}

impl Default for MockProbe {
  fn default() -> Self {
    Self::new()
  }
}

impl MockProbe {
  pub fn new() -> Self {
    Self { responses: HashMap::new(), fail_on: Vec::new() }
  }

  pub fn with_records(mut self, kind: ScanKind, records: Vec<ScanRecord>) -> Self {
    self.responses.insert(kind, records);
    self
  }

  pub fn with_failure_on(mut self, kind: ScanKind) -> Self {
    self.fail_on.push(kind);
    self
  }
}

#[async_trait]
impl ScanProbe for MockProbe {
  async fn perform_scan(&self, kind: ScanKind) -> Result<Vec<ScanRecord>> {
    if self.fail_on.contains(&kind) {
      return Err(anyhow!("mock {} probe failure", kind.label()));
    }

    Ok(self.responses.get(&kind).cloned().unwrap_or_default())
  }
}
