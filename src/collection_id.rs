//! Deterministic collection identifiers
//!
//! Steam has no registry handing out collection ids, so every id is derived
//! from the category name itself. The same name in any casing always maps to
//! the same `uc-<id>` key, across runs and machines.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

/// Prefix shared by every collection record in the catalog
pub const COLLECTION_KEY_PREFIX: &str = "user-collections.";

/// Reserved key of the "hidden" collection
pub const HIDDEN_KEY: &str = "user-collections.hidden";

/// Reserved key of the "favorite" collection
pub const FAVORITE_KEY: &str = "user-collections.favorite";

/// Length of the generated id segment
pub const ID_LENGTH: usize = 12;

/// Stable short identifier for a category name
///
/// Lower-cases the name, hashes it with SHA-256 and keeps the first 12
/// alphanumeric characters of the URL-safe base64 digest.
pub fn collection_id(name: &str) -> String {
    let digest = Sha256::digest(name.to_lowercase().as_bytes());
    URL_SAFE_NO_PAD
        .encode(digest)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(ID_LENGTH)
        .collect()
}

/// The id stored in the nested document of a user category (`uc-<id>`)
pub fn category_document_id(name: &str) -> String {
    format!("uc-{}", collection_id(name))
}

/// Full catalog key of a user category (`user-collections.uc-<id>`)
pub fn collection_key(name: &str) -> String {
    format!("{}{}", COLLECTION_KEY_PREFIX, category_document_id(name))
}

/// Whether a catalog key belongs to the collections namespace
pub fn is_collection_key(key: &str) -> bool {
    key.starts_with(COLLECTION_KEY_PREFIX)
}
