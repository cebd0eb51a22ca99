//! Steam platform implementation
//!
//! Resolves the Steam install, the accounts that have used it and the two
//! places a client may keep the collections catalog.

mod account;
mod locate;

pub use account::AccountId;
pub use locate::{
    cloud_storage_namespace_file, discover_accounts, htmlcache_leveldb_dir, locate_steam_root,
};
