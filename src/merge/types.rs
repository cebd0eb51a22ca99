// Shared merge types

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

use crate::catalog::GameId;

/// Timestamp and version stamped on every record written by one merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteStamp {
    /// Seconds since the Unix epoch
    pub timestamp: i64,
    /// `YYYYMMDD`
    pub version: String,
}

impl WriteStamp {
    pub fn at(time: DateTime<Utc>) -> Self {
        Self {
            timestamp: time.timestamp(),
            version: time.format("%Y%m%d").to_string(),
        }
    }

    pub fn now() -> Self {
        Self::at(Utc::now())
    }
}

/// One collection the snapshot says should exist, with its members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipEntry {
    /// Catalog key (`user-collections.…`)
    pub key: String,
    /// Id stored in the nested document
    pub id: String,
    /// Display name stored in the nested document
    pub name: String,
    pub members: BTreeSet<GameId>,
}
