//! Reporting for errors the engine recovers from
//!
//! The merge and the read-side projection never abort on a single bad nested
//! document, and a read never aborts on a single malformed catalog element.
//! Each failure goes to a `SyncObserver` supplied by the caller.

use crate::error::{DecodeError, RecordParseError};

pub trait SyncObserver {
    /// A record's nested document could not be parsed and was left as is
    fn record_skipped(&self, key: &str, error: &RecordParseError);

    /// A top-level element was not a `[key, record]` pair and was left out of a read
    fn pair_skipped(&self, index: usize, error: &DecodeError);
}

/// Forwards recovered errors to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SyncObserver for TracingObserver {
    fn record_skipped(&self, key: &str, error: &RecordParseError) {
        tracing::warn!(key, %error, "skipping collection record");
    }

    fn pair_skipped(&self, index: usize, error: &DecodeError) {
        tracing::warn!(index, %error, "skipping catalog element");
    }
}

/// Drops every report
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl SyncObserver for SilentObserver {
    fn record_skipped(&self, _key: &str, _error: &RecordParseError) {}

    fn pair_skipped(&self, _index: usize, _error: &DecodeError) {}
}
