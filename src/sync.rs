//! Synchronization facade
//!
//! The only entry point callers need: probe the store, load the catalog,
//! merge the snapshot in and commit the result. Nothing is written unless the
//! whole merged catalog was built.

use crate::catalog::SteamCollection;
use crate::collection_id::is_collection_key;
use crate::error::{BackendKind, SyncError};
use crate::merge::{WriteStamp, merge};
use crate::observer::SyncObserver;
use crate::snapshot::MembershipSnapshot;
use crate::store::CatalogStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The merged catalog was written
    Committed {
        backend: BackendKind,
        /// Collection records in the committed catalog
        collections: usize,
    },
    /// This installation keeps no catalog in the store
    NotApplicable,
}

pub fn sync(
    store: &CatalogStore,
    snapshot: &MembershipSnapshot,
    observer: &dyn SyncObserver,
) -> Result<SyncOutcome, SyncError> {
    sync_at(store, snapshot, &WriteStamp::now(), observer)
}

/// [`sync`] with an explicit write stamp
pub fn sync_at(
    store: &CatalogStore,
    snapshot: &MembershipSnapshot,
    stamp: &WriteStamp,
    observer: &dyn SyncObserver,
) -> Result<SyncOutcome, SyncError> {
    let backend = store.kind();
    let wrap = |source| SyncError::new(backend, source);

    if !store.probe().map_err(wrap)? {
        tracing::info!(%backend, "no collections catalog in this store");
        return Ok(SyncOutcome::NotApplicable);
    }

    let existing = store.load().map_err(wrap)?;
    let merged = merge(&existing, snapshot, stamp, observer);
    store.commit(&merged).map_err(wrap)?;

    let collections = merged.keys().filter(|key| is_collection_key(key)).count();
    tracing::info!(%backend, collections, "collections synchronized");
    Ok(SyncOutcome::Committed {
        backend,
        collections,
    })
}

/// Synchronize the first store that holds a catalog
pub fn sync_first_supported(
    stores: &[CatalogStore],
    snapshot: &MembershipSnapshot,
    observer: &dyn SyncObserver,
) -> Result<SyncOutcome, SyncError> {
    let stamp = WriteStamp::now();
    for store in stores {
        match sync_at(store, snapshot, &stamp, observer)? {
            SyncOutcome::NotApplicable => continue,
            committed => return Ok(committed),
        }
    }
    Ok(SyncOutcome::NotApplicable)
}

/// Live collections of the store, `None` when it holds no catalog
///
/// Malformed catalog elements are reported to `observer` and skipped.
pub fn read_collections(
    store: &CatalogStore,
    observer: &dyn SyncObserver,
) -> Result<Option<Vec<SteamCollection>>, SyncError> {
    let wrap = |source| SyncError::new(store.kind(), source);

    if !store.probe().map_err(wrap)? {
        return Ok(None);
    }
    let catalog = store.load_lenient(observer).map_err(wrap)?;
    Ok(Some(catalog.collections(observer)))
}

/// [`read_collections`] on the first store that holds a catalog
pub fn read_first_supported(
    stores: &[CatalogStore],
    observer: &dyn SyncObserver,
) -> Result<Option<(BackendKind, Vec<SteamCollection>)>, SyncError> {
    for store in stores {
        if let Some(collections) = read_collections(store, observer)? {
            return Ok(Some((store.kind(), collections)));
        }
    }
    Ok(None)
}
