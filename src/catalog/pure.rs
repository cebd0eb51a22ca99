pub mod codec;
pub mod projection;

// Re-exports
pub use codec::{decode, decode_lenient, encode, encode_text};
pub use projection::live_collections;
