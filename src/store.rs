//! Catalog storage backends
//!
//! Two backends hold a catalog: the cloud-storage JSON file newer Steam
//! clients use, and the htmlcache LevelDB older clients use. Both expose the
//! same probe / load / commit capability through `CatalogStore`.

pub mod file;
pub mod leveldb;

pub use file::{BackupPolicy, FileCatalog};
pub use leveldb::LevelDbCatalog;

use std::path::Path;

use crate::catalog::Catalog;
use crate::config::BackendPreference;
use crate::error::{BackendKind, StoreError};
use crate::observer::SyncObserver;
use crate::platform::steam::{AccountId, cloud_storage_namespace_file, htmlcache_leveldb_dir};

#[derive(Debug, Clone)]
pub enum CatalogStore {
    File(FileCatalog),
    LevelDb(LevelDbCatalog),
}

impl CatalogStore {
    pub fn kind(&self) -> BackendKind {
        match self {
            CatalogStore::File(_) => BackendKind::File,
            CatalogStore::LevelDb(_) => BackendKind::LevelDb,
        }
    }

    /// Whether this installation keeps a catalog in this backend
    pub fn probe(&self) -> Result<bool, StoreError> {
        match self {
            CatalogStore::File(store) => Ok(store.probe()),
            CatalogStore::LevelDb(store) => store.probe(),
        }
    }

    pub fn load(&self) -> Result<Catalog, StoreError> {
        match self {
            CatalogStore::File(store) => store.load(),
            CatalogStore::LevelDb(store) => store.load(),
        }
    }

    /// Load for display; malformed elements are reported and left out
    pub fn load_lenient(&self, observer: &dyn SyncObserver) -> Result<Catalog, StoreError> {
        match self {
            CatalogStore::File(store) => store.load_lenient(observer),
            CatalogStore::LevelDb(store) => store.load_lenient(observer),
        }
    }

    pub fn commit(&self, catalog: &Catalog) -> Result<(), StoreError> {
        match self {
            CatalogStore::File(store) => store.commit(catalog),
            CatalogStore::LevelDb(store) => store.commit(catalog),
        }
    }

    /// Candidate stores for an account, most current backend first
    pub fn candidates(
        steam_root: &Path,
        account: AccountId,
        preference: BackendPreference,
        backup: BackupPolicy,
    ) -> Vec<CatalogStore> {
        let file = || {
            CatalogStore::File(FileCatalog::new(
                cloud_storage_namespace_file(steam_root, account),
                backup,
            ))
        };
        let leveldb = || {
            CatalogStore::LevelDb(LevelDbCatalog::new(
                htmlcache_leveldb_dir(steam_root),
                account,
            ))
        };

        match preference {
            BackendPreference::Auto => vec![file(), leveldb()],
            BackendPreference::File => vec![file()],
            BackendPreference::LevelDb => vec![leveldb()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_prefers_the_file_backend() {
        let stores = CatalogStore::candidates(
            Path::new("/steam"),
            AccountId::new(42),
            BackendPreference::Auto,
            BackupPolicy::Required,
        );
        let kinds: Vec<BackendKind> = stores.iter().map(CatalogStore::kind).collect();
        assert_eq!(kinds, [BackendKind::File, BackendKind::LevelDb]);

        let CatalogStore::File(file) = &stores[0] else {
            panic!("expected file store first");
        };
        assert!(
            file.path()
                .ends_with("userdata/42/config/cloudstorage/cloud-storage-namespace-1.json")
        );
    }

    #[test]
    fn explicit_preference_selects_one_backend() {
        let stores = CatalogStore::candidates(
            Path::new("/steam"),
            AccountId::new(42),
            BackendPreference::LevelDb,
            BackupPolicy::Required,
        );
        assert_eq!(stores.len(), 1);
        assert_eq!(stores[0].kind(), BackendKind::LevelDb);
    }
}
