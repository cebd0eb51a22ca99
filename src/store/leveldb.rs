// Steam htmlcache local-storage backend
//
// Older clients keep the catalog in Chromium's local storage, a LevelDB
// database, as one value under a key namespaced by the steamloopback origin
// and the account id. The value starts with a one-byte text-encoding marker.

use rusty_leveldb::{DB, Options};
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, TextEncoding, decode, decode_lenient, encode_text};
use crate::error::{DecodeError, EncodeError, StoreError};
use crate::observer::SyncObserver;
use crate::platform::steam::AccountId;

/// Origin prefix Chromium uses for the Steam client's local storage
pub const STEAM_ORIGIN: &str = "_https://steamloopback.host";

/// Marker byte of a UTF-16LE payload
pub const MARKER_UTF16LE: u8 = 0x00;
/// Marker byte of an 8-bit (Latin-1) payload
pub const MARKER_LATIN1: u8 = 0x01;

/// Composite key of the collections catalog for `account`
pub fn storage_key(account: AccountId) -> Vec<u8> {
    format!("{STEAM_ORIGIN}\u{0}\u{1}U{account}-cloud-storage-namespace-1").into_bytes()
}

pub fn marker_encoding(marker: u8) -> Result<TextEncoding, DecodeError> {
    match marker {
        MARKER_UTF16LE => Ok(TextEncoding::Utf16Le),
        MARKER_LATIN1 => Ok(TextEncoding::Latin1),
        other => Err(DecodeError::UnknownMarker(other)),
    }
}

/// Encoding a commit uses: the one the catalog was read with, widened to
/// UTF-16LE when the new text no longer fits in Latin-1
pub fn commit_encoding(loaded: TextEncoding, text: &str) -> TextEncoding {
    match loaded {
        TextEncoding::Utf16Le => TextEncoding::Utf16Le,
        _ if TextEncoding::Latin1.can_represent(text) => TextEncoding::Latin1,
        _ => TextEncoding::Utf16Le,
    }
}

pub fn decode_payload(payload: &[u8]) -> Result<Catalog, DecodeError> {
    let (&marker, text) = payload.split_first().ok_or(DecodeError::EmptyPayload)?;
    decode(text, marker_encoding(marker)?)
}

/// [`decode_payload`] skipping malformed elements; marker errors stay fatal
pub fn decode_payload_lenient(
    payload: &[u8],
    observer: &dyn SyncObserver,
) -> Result<Catalog, DecodeError> {
    let (&marker, text) = payload.split_first().ok_or(DecodeError::EmptyPayload)?;
    decode_lenient(text, marker_encoding(marker)?, observer)
}

pub fn encode_payload(catalog: &Catalog) -> Result<Vec<u8>, EncodeError> {
    let text = encode_text(catalog)?;
    let encoding = commit_encoding(catalog.encoding(), &text);
    let marker = match encoding {
        TextEncoding::Utf16Le => MARKER_UTF16LE,
        TextEncoding::Latin1 | TextEncoding::Utf8 => MARKER_LATIN1,
    };

    let mut payload = vec![marker];
    payload.extend(encoding.encode(&text)?);
    Ok(payload)
}

#[derive(Debug, Clone)]
pub struct LevelDbCatalog {
    path: PathBuf,
    account: AccountId,
}

impl LevelDbCatalog {
    pub fn new(path: impl Into<PathBuf>, account: AccountId) -> Self {
        Self {
            path: path.into(),
            account,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn account(&self) -> AccountId {
        self.account
    }

    pub fn probe(&self) -> Result<bool, StoreError> {
        if !self.path.join("CURRENT").is_file() {
            return Ok(false);
        }
        let mut handle = StoreHandle::open(&self.path)?;
        let present = handle.get(&storage_key(self.account)).is_some();
        handle.close()?;
        Ok(present)
    }

    pub fn load(&self) -> Result<Catalog, StoreError> {
        Ok(decode_payload(&self.read()?)?)
    }

    /// Load for display, skipping malformed elements
    pub fn load_lenient(&self, observer: &dyn SyncObserver) -> Result<Catalog, StoreError> {
        Ok(decode_payload_lenient(&self.read()?, observer)?)
    }

    fn read(&self) -> Result<Vec<u8>, StoreError> {
        let key = storage_key(self.account);
        let mut handle = StoreHandle::open(&self.path)?;
        let payload = handle.get(&key);
        handle.close()?;

        let payload = payload
            .ok_or_else(|| StoreError::MissingKey(String::from_utf8_lossy(&key).into_owned()))?;
        tracing::debug!(
            path = %self.path.display(),
            bytes = payload.len(),
            "loaded catalog from leveldb"
        );
        Ok(payload)
    }

    pub fn commit(&self, catalog: &Catalog) -> Result<(), StoreError> {
        let payload = encode_payload(catalog)?;
        let mut handle = StoreHandle::open(&self.path)?;
        handle.put(&storage_key(self.account), &payload)?;
        handle.close()?;
        tracing::debug!(
            path = %self.path.display(),
            bytes = payload.len(),
            "committed catalog to leveldb"
        );
        Ok(())
    }
}

/// An open database, scoped to one operation
///
/// Dropping the handle releases the database lock, so early returns close it too.
struct StoreHandle {
    db: DB,
    path: PathBuf,
}

impl StoreHandle {
    fn open(path: &Path) -> Result<Self, StoreError> {
        let options = Options {
            create_if_missing: false,
            paranoid_checks: true,
            ..Options::default()
        };
        let db = DB::open(path, options).map_err(|e| leveldb_error(path, "open", e))?;
        Ok(Self {
            db,
            path: path.to_path_buf(),
        })
    }

    fn get(&mut self, key: &[u8]) -> Option<Vec<u8>> {
        self.db.get(key).map(|value| value.to_vec())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.db
            .put(key, value)
            .map_err(|e| leveldb_error(&self.path, "put", e))
    }

    fn close(mut self) -> Result<(), StoreError> {
        self.db
            .flush()
            .map_err(|e| leveldb_error(&self.path, "flush", e))
    }
}

fn leveldb_error(
    path: &Path,
    operation: &'static str,
    status: rusty_leveldb::Status,
) -> StoreError {
    StoreError::LevelDb {
        path: path.to_path_buf(),
        operation,
        message: status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CollectionRecord;
    use crate::observer::testing::RecordingObserver;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"[["user-collections.favorite",{"key":"user-collections.favorite","timestamp":1,"value":"{\"id\":\"favorite\",\"added\":[7],\"removed\":[]}"}]]"#;

    fn account() -> AccountId {
        AccountId::new(12345678)
    }

    fn seed(path: &Path, key: &[u8], payload: &[u8]) {
        let options = Options {
            create_if_missing: true,
            ..Options::default()
        };
        let mut db = DB::open(path, options).unwrap();
        db.put(key, payload).unwrap();
        db.flush().unwrap();
    }

    fn payload(marker: u8, bytes: Vec<u8>) -> Vec<u8> {
        let mut payload = vec![marker];
        payload.extend(bytes);
        payload
    }

    #[test]
    fn key_is_namespaced_by_origin_and_account() {
        assert_eq!(
            storage_key(account()),
            b"_https://steamloopback.host\x00\x01U12345678-cloud-storage-namespace-1".to_vec()
        );
    }

    #[test]
    fn markers_map_symmetrically() {
        for encoding in [TextEncoding::Latin1, TextEncoding::Utf16Le] {
            let catalog = Catalog::new(encoding);
            let payload = encode_payload(&catalog).unwrap();
            assert_eq!(marker_encoding(payload[0]).unwrap(), encoding);
            assert_eq!(decode_payload(&payload).unwrap().encoding(), encoding);
        }
        assert!(matches!(marker_encoding(7), Err(DecodeError::UnknownMarker(7))));
        assert!(matches!(decode_payload(&[]), Err(DecodeError::EmptyPayload)));
    }

    #[test]
    fn latin1_catalog_widens_for_wide_text() {
        let mut catalog = Catalog::new(TextEncoding::Latin1);
        catalog.push("日本", CollectionRecord::default());
        let payload = encode_payload(&catalog).unwrap();
        assert_eq!(payload[0], MARKER_UTF16LE);
        assert_eq!(decode_payload(&payload).unwrap().entries(), catalog.entries());
    }

    #[test]
    fn utf8_catalog_commits_as_latin1() {
        assert_eq!(commit_encoding(TextEncoding::Utf8, "[]"), TextEncoding::Latin1);
        assert_eq!(commit_encoding(TextEncoding::Utf8, "[\"ü\"]"), TextEncoding::Latin1);
        assert_eq!(commit_encoding(TextEncoding::Utf16Le, "[]"), TextEncoding::Utf16Le);
    }

    #[test]
    fn probe_is_false_without_database() {
        let dir = tempdir().unwrap();
        let store = LevelDbCatalog::new(dir.path().join("leveldb"), account());
        assert!(!store.probe().unwrap());
        std::fs::create_dir(store.path()).unwrap();
        assert!(!store.probe().unwrap());
    }

    #[test]
    fn probe_looks_for_account_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("leveldb");
        seed(&path, b"_https://other.origin\x00\x01key", b"\x01[]");

        assert!(!LevelDbCatalog::new(&path, account()).probe().unwrap());

        seed(&path, &storage_key(account()), &payload(MARKER_LATIN1, SAMPLE.as_bytes().to_vec()));
        assert!(LevelDbCatalog::new(&path, account()).probe().unwrap());
        assert!(!LevelDbCatalog::new(&path, AccountId::new(1)).probe().unwrap());
    }

    #[test]
    fn load_reads_utf16_payload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("leveldb");
        let bytes = TextEncoding::Utf16Le.encode(SAMPLE).unwrap();
        seed(&path, &storage_key(account()), &payload(MARKER_UTF16LE, bytes));

        let catalog = LevelDbCatalog::new(&path, account()).load().unwrap();

        assert_eq!(catalog.encoding(), TextEncoding::Utf16Le);
        assert_eq!(encode_text(&catalog).unwrap(), SAMPLE);
    }

    #[test]
    fn load_reports_missing_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("leveldb");
        seed(&path, b"unrelated", b"x");
        assert!(matches!(
            LevelDbCatalog::new(&path, account()).load(),
            Err(StoreError::MissingKey(_))
        ));
    }

    #[test]
    fn commit_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("leveldb");
        seed(&path, &storage_key(account()), &payload(MARKER_LATIN1, SAMPLE.as_bytes().to_vec()));
        let store = LevelDbCatalog::new(&path, account());

        let mut catalog = store.load().unwrap();
        catalog.push("showcases.1", CollectionRecord::default());
        store.commit(&catalog).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.encoding(), TextEncoding::Latin1);
        assert_eq!(reloaded.entries(), catalog.entries());
    }

    #[test]
    fn open_failure_names_the_operation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("leveldb");
        std::fs::create_dir(&path).unwrap();
        match LevelDbCatalog::new(&path, account()).load() {
            Err(StoreError::LevelDb { operation, .. }) => assert_eq!(operation, "open"),
            other => panic!("expected open failure, got {other:?}"),
        }
    }

    #[test]
    fn lenient_load_skips_malformed_elements() {
        let dir = tempdir().unwrap();
        let text = SAMPLE.replacen('[', r#"["junk","#, 1);
        seed(dir.path(), &storage_key(account()), &payload(MARKER_LATIN1, text.into_bytes()));
        let store = LevelDbCatalog::new(dir.path(), account());
        let observer = RecordingObserver::default();

        let catalog = store.load_lenient(&observer).unwrap();

        assert_eq!(catalog.keys().collect::<Vec<_>>(), ["user-collections.favorite"]);
        assert_eq!(*observer.skipped_pairs.borrow(), vec![0]);
        assert!(matches!(
            store.load(),
            Err(StoreError::Decode(DecodeError::MalformedPair { index: 0, .. }))
        ));
    }
}
