use async_trait::async_trait;

use sweep::model::{SavedScan, ScanKind, ScanRecord};
use sweep::report;

use crate::auth::SessionContext;
use crate::error::RelayError;
use crate::types::{CreateScanRequest, CreateScanResponse};

/// The persistence boundary, owned by the remote authority
#[async_trait]
pub trait PersistenceApi {
  /// Full saved-scan list for the authenticated principal, newest first
  async fn list_saved(&self, token: &str) -> Result<Vec<SavedScan>, RelayError>;

  /// Persist a snapshot; the returned descriptor carries the assigned id
  async fn create_saved(
    &self,
    token: &str,
    request: CreateScanRequest,
  ) -> Result<CreateScanResponse, RelayError>;

  /// One saved scan with its snapshot items
  async fn fetch_saved(&self, token: &str, id: &str) -> Result<SavedScan, RelayError>;

  async fn delete_saved(&self, token: &str, id: &str) -> Result<(), RelayError>;

  /// The authority's rendered export document for a saved scan
  async fn fetch_saved_content(&self, token: &str, id: &str) -> Result<String, RelayError>;
}

/// A saved-scan entry lifted out of the local list ahead of the remote
/// delete. Holds everything `rollback` needs to restore the list to its
/// exact pre-call contents.
#[derive(Debug)]
pub struct PendingRemoval {
  index: usize,
  entry: SavedScan,
}

impl PendingRemoval {
  pub fn id(&self) -> &str {
    &self.entry.id
  }
}

/// Mediates between the local saved-scan list and the remote authority.
///
/// The local list is only ever replaced wholesale by `refresh` or moved
/// through the explicit optimistic-removal states of `remove`; no entry has
/// any other intermediate state. Callers serialize operations that target
/// the same scan id (`&mut self` makes conflicting concurrent calls on one
/// registry unrepresentable).
pub struct RemoteScanRegistry<P> {
  api: P,
  saved: Vec<SavedScan>,
}

impl<P: PersistenceApi + Sync> RemoteScanRegistry<P> {
  pub fn new(api: P) -> Self {
    Self { api, saved: Vec::new() }
  }

  /// The local saved-scan list, in the authority's order
  pub fn saved(&self) -> &[SavedScan] {
    &self.saved
  }

  pub fn api(&self) -> &P {
    &self.api
  }

  /// Replace the local list wholesale from the remote authority.
  ///
  /// On `Unauthorized` the local list is cleared and the context token
  /// invalidated before the error is returned: the caller must treat the
  /// session as logged out. Transport failures leave the list untouched.
  pub async fn refresh(&mut self, ctx: &mut SessionContext) -> Result<(), RelayError> {
    match self.api.list_saved(ctx.token()).await {
      Ok(list) => {
        tracing::debug!(count = list.len(), "saved-scan list refreshed");
        self.saved = list;
        Ok(())
      }
      Err(RelayError::Unauthorized) => {
        tracing::warn!("session token rejected; clearing local saved-scan state");
        self.saved.clear();
        ctx.invalidate();
        Err(RelayError::Unauthorized)
      }
      Err(err) => Err(err),
    }
  }

  /// Persist the given records as a named snapshot.
  ///
  /// No optimistic insert: the authoritative id is unknown until the remote
  /// call returns, so on failure the local list is untouched. On success the
  /// list is merged by re-running `refresh`, keeping the authority the only
  /// source of truth for ordering and metadata.
  pub async fn save(
    &mut self,
    ctx: &mut SessionContext,
    kind: ScanKind,
    name: &str,
    records: &[ScanRecord],
  ) -> Result<CreateScanResponse, RelayError> {
    let items = records
      .iter()
      .map(serde_json::to_value)
      .collect::<Result<Vec<_>, _>>()
      .map_err(|e| RelayError::transport(format!("unencodable scan record: {e}")))?;

    let request = CreateScanRequest { name: name.to_string(), kind, items };
    let created = self.api.create_saved(ctx.token(), request).await?;
    tracing::debug!(id = %created.id, kind = kind.label(), "scan persisted");

    self.refresh(ctx).await?;
    Ok(created)
  }

  /// First phase of removal: take the entry out of the local list,
  /// remembering its position for an exact rollback.
  pub fn apply_optimistic(&mut self, id: &str) -> Result<PendingRemoval, RelayError> {
    let index = self
      .saved
      .iter()
      .position(|scan| scan.id == id)
      .ok_or_else(|| RelayError::unknown_scan(id))?;

    let entry = self.saved.remove(index);
    Ok(PendingRemoval { index, entry })
  }

  /// Finalize a removal confirmed by the authority. Dropping the pending
  /// entry is the whole transition; the method exists so the state machine
  /// is explicit.
  pub fn commit(&mut self, pending: PendingRemoval) {
    tracing::debug!(id = %pending.entry.id, "removal committed");
  }

  /// Undo an optimistic removal, restoring the entry at its old position
  pub fn rollback(&mut self, pending: PendingRemoval) {
    let index = pending.index.min(self.saved.len());
    self.saved.insert(index, pending.entry);
  }

  /// Optimistically remove `id` locally, then confirm with the authority.
  /// A remote failure restores the local list to its exact pre-call
  /// contents, order included, and surfaces the error.
  pub async fn remove(&mut self, ctx: &mut SessionContext, id: &str) -> Result<(), RelayError> {
    let pending = self.apply_optimistic(id)?;

    match self.api.delete_saved(ctx.token(), id).await {
      Ok(()) => {
        self.commit(pending);
        Ok(())
      }
      Err(err) => {
        tracing::warn!(id, error = %err, "remote delete failed; restoring local entry");
        self.rollback(pending);
        Err(err)
      }
    }
  }

  /// Filename-safe descriptor `{kind_label}-{iso_date}` for a saved scan.
  /// Pure; resolved entirely from the local list.
  pub fn export_descriptor(&self, id: &str) -> Result<String, RelayError> {
    let entry = self
      .saved
      .iter()
      .find(|scan| scan.id == id)
      .ok_or_else(|| RelayError::unknown_scan(id))?;

    Ok(report::export_stem(entry.kind, entry.timestamp))
  }
}
