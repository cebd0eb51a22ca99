//! Keeps Steam's library collections in step with an externally managed
//! category model.
//!
//! A [`MembershipSnapshot`] says which game belongs to which category; [`sync`]
//! merges it into the collection catalog of one Steam installation, whether
//! that catalog lives in the cloud-storage JSON file or the htmlcache LevelDB.

pub mod catalog;
pub mod collection_id;
pub mod config;
pub mod error;
pub mod merge;
pub mod observer;
pub mod paths;
pub mod platform;
pub mod snapshot;
pub mod store;
pub mod sync;

pub use catalog::{Catalog, SteamCollection};
pub use error::{BackendKind, StoreError, SyncError};
pub use merge::{WriteStamp, merge};
pub use observer::{SilentObserver, SyncObserver, TracingObserver};
pub use platform::AccountId;
pub use snapshot::{GameMembership, MembershipSnapshot};
pub use store::{BackupPolicy, CatalogStore};
pub use sync::{
    SyncOutcome, read_collections, read_first_supported, sync, sync_at, sync_first_supported,
};
