//! Platform integration - WHERE the catalog lives
//!
//! Only Steam keeps a collections catalog:
//! - Steam: install location via steamlocate, per-account userdata and htmlcache paths

pub mod steam;

pub use steam::{AccountId, discover_accounts, locate_steam_root};
