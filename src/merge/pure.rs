pub mod membership;
pub mod overlay;
pub mod reset;

// Re-exports
pub use membership::{canonical_membership, canonical_name, folded_name};
pub use overlay::{overlay, synthesize};
pub use reset::{cleared_document, reset_added};
