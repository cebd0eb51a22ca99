//! Steam collection catalog
//!
//! Record model, text encodings and the outer codec. The nested per-record
//! document is parsed only by the merge engine and the read-side projection.

pub mod encoding;
pub mod pure;
pub mod types;

// Re-export types
pub use encoding::TextEncoding;
pub use types::{
    Catalog, CatalogEntry, CollectionRecord, CollectionValue, FilterSpec, GameId, SteamCollection,
};

// Re-export pure functions
pub use pure::{decode, decode_lenient, encode, encode_text, live_collections};

use crate::observer::SyncObserver;

impl Catalog {
    /// Live collections of this catalog, see [`live_collections`]
    pub fn collections(&self, observer: &dyn SyncObserver) -> Vec<SteamCollection> {
        live_collections(self, observer)
    }
}
