//! Error types for every layer of a synchronization cycle

use std::fmt;
use std::path::PathBuf;

use crate::catalog::TextEncoding;

/// The catalog bytes are not a well-formed sequence of `[key, record]` pairs
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("catalog text is not valid {0}")]
    InvalidText(TextEncoding),
    #[error("catalog is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("catalog top level is {found}, expected an array of [key, record] pairs")]
    NotAnArray { found: &'static str },
    #[error("catalog element {index} is not a [key, record] pair: {reason}")]
    MalformedPair { index: usize, reason: &'static str },
    #[error("embedded payload is empty")]
    EmptyPayload,
    #[error("unknown text-encoding marker byte {0:#04x}")]
    UnknownMarker(u8),
}

/// The catalog could not be serialized
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("failed to serialize catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog text cannot be represented as {0}")]
    Unrepresentable(TextEncoding),
}

/// One record's nested collection document failed to parse
///
/// Recovered locally: the record is left untouched and the cycle goes on.
#[derive(Debug, thiserror::Error)]
pub enum RecordParseError {
    #[error("nested document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("nested document is not a JSON object")]
    NotAnObject,
}

/// Underlying storage failure
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to back up catalog to {}: {source}", path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("leveldb at {} failed to {operation}: {message}", path.display())]
    LevelDb {
        path: PathBuf,
        operation: &'static str,
        message: String,
    },
    #[error("key {0:?} is not present in the store")]
    MissingKey(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Which catalog backend an operation ran against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    File,
    LevelDb,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::File => f.write_str("cloud-storage file"),
            BackendKind::LevelDb => f.write_str("htmlcache leveldb"),
        }
    }
}

/// Failure of a synchronization cycle, tagged with the originating backend
#[derive(Debug, thiserror::Error)]
#[error("{backend} catalog: {source}")]
pub struct SyncError {
    pub backend: BackendKind,
    #[source]
    pub source: StoreError,
}

impl SyncError {
    pub fn new(backend: BackendKind, source: StoreError) -> Self {
        Self { backend, source }
    }
}

/// Settings file failure
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access settings at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid account id {0:?}")]
    InvalidAccount(String),
}
