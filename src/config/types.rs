use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::platform::AccountId;
use crate::store::BackupPolicy;

/// Which catalog backend to synchronize
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BackendPreference {
    /// Cloud-storage file if present, htmlcache leveldb otherwise
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "file")]
    File,
    #[serde(rename = "leveldb")]
    LevelDb,
}

impl BackendPreference {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "file" => Some(Self::File),
            "leveldb" => Some(Self::LevelDb),
            _ => None,
        }
    }
}

/// Main application configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct SyncConfig {
    /// Steam root override (None = locate automatically)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steam_path: Option<PathBuf>,
    /// Account to synchronize: `12345`, `[U:1:12345]` or a SteamID64
    /// None = the only account found in userdata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(default)]
    pub backend: BackendPreference,
    /// Policy for the cloud-storage file backup taken before each commit
    #[serde(default)]
    pub backup: BackupPolicy,
}

impl SyncConfig {
    pub fn account_id(&self) -> Result<Option<AccountId>, ConfigError> {
        self.account.as_deref().map(str::parse::<AccountId>).transpose()
    }
}
