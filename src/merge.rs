//! Merge engine
//!
//! Rewrites an existing catalog from a fresh membership snapshot. Records the
//! engine owns are rebuilt, collections it does not know about are emptied
//! but kept, and every record outside `user-collections.` passes through
//! untouched.

pub mod pure;
pub mod types;

// Re-export types
pub use types::{MembershipEntry, WriteStamp};

use crate::catalog::{Catalog, CatalogEntry};
use crate::observer::SyncObserver;
use crate::snapshot::MembershipSnapshot;

use pure::{canonical_membership, overlay, reset_added, synthesize};

/// Merge `snapshot` into `existing`
///
/// The result keeps `existing`'s order and text encoding, with collections
/// new to the catalog appended at the end.
pub fn merge(
    existing: &Catalog,
    snapshot: &MembershipSnapshot,
    stamp: &WriteStamp,
    observer: &dyn SyncObserver,
) -> Catalog {
    let membership = canonical_membership(snapshot);
    let base = reset_added(existing.entries(), stamp, observer);
    let fresh: Vec<CatalogEntry> = membership
        .iter()
        .map(|entry| synthesize(entry, stamp))
        .collect();

    tracing::debug!(
        existing = existing.len(),
        collections = fresh.len(),
        "merging collection membership"
    );

    Catalog::from_entries(overlay(base, fresh), existing.encoding())
}
