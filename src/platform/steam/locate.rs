//! Steam install and catalog path resolution
//!
//! Uses steamlocate crate to find the Steam install, falling back to the
//! usual Linux locations.

use std::path::{Path, PathBuf};

use super::AccountId;
use crate::paths::PATH_STEAM;

/// Find the Steam root directory
///
/// An explicitly configured path always wins.
pub fn locate_steam_root(configured: Option<&Path>) -> PathBuf {
    if let Some(path) = configured {
        return path.to_path_buf();
    }

    match steamlocate::SteamDir::locate() {
        Ok(steam_dir) => steam_dir.path().to_path_buf(),
        Err(e) => {
            tracing::debug!(error = %e, fallback = %PATH_STEAM.display(), "steamlocate failed");
            PATH_STEAM.clone()
        }
    }
}

/// `{STEAM}/userdata/{account}/config/cloudstorage/cloud-storage-namespace-1.json`
pub fn cloud_storage_namespace_file(steam_root: &Path, account: AccountId) -> PathBuf {
    steam_root
        .join("userdata")
        .join(account.to_string())
        .join("config/cloudstorage/cloud-storage-namespace-1.json")
}

/// Chromium local storage of the Steam client
///
/// Windows keeps it under `%LOCALAPPDATA%/Steam`, other systems inside the
/// Steam root.
pub fn htmlcache_leveldb_dir(steam_root: &Path) -> PathBuf {
    if cfg!(windows) {
        if let Some(local_app_data) = std::env::var_os("LOCALAPPDATA") {
            return PathBuf::from(local_app_data).join("Steam/htmlcache/Local Storage/leveldb");
        }
    }
    steam_root.join("config/htmlcache/Local Storage/leveldb")
}

/// Accounts with a `userdata` directory, in ascending order
///
/// Account 0 is the anonymous user and is never returned.
pub fn discover_accounts(steam_root: &Path) -> Vec<AccountId> {
    let userdata = steam_root.join("userdata");
    if !userdata.is_dir() {
        return Vec::new();
    }

    let mut accounts: Vec<AccountId> = walkdir::WalkDir::new(&userdata)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .filter_map(|e| e.file_name().to_str().and_then(|n| n.parse::<u32>().ok()))
        .filter(|&id| id != 0)
        .map(AccountId::new)
        .collect();
    accounts.sort();
    accounts
}
