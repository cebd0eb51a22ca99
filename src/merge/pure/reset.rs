// Pass 1: empty the member list of every existing collection record

use serde_json::Value;

use crate::catalog::CatalogEntry;
use crate::collection_id::is_collection_key;
use crate::error::RecordParseError;
use crate::merge::types::WriteStamp;
use crate::observer::SyncObserver;

const FIELD_ADDED: &str = "added";

/// Copy of `entries` with every collection's `added` list emptied
///
/// Each emptied record carries `stamp`, so Steam treats the empty list as the
/// newer state. Records outside the collections namespace, records without a
/// nested document and records whose document does not parse are copied
/// unchanged.
pub fn reset_added(
    entries: &[CatalogEntry],
    stamp: &WriteStamp,
    observer: &dyn SyncObserver,
) -> Vec<CatalogEntry> {
    entries
        .iter()
        .map(|entry| {
            let mut entry = entry.clone();
            if !is_collection_key(&entry.key) {
                return entry;
            }
            if let Some(document) = entry.record.value() {
                match cleared_document(document) {
                    Ok(cleared) => {
                        entry.record.set_value(cleared);
                        entry.record.set_timestamp(stamp.timestamp);
                        entry.record.set_version(&stamp.version);
                    }
                    Err(e) => observer.record_skipped(&entry.key, &e),
                }
            }
            entry
        })
        .collect()
}

/// The nested document with `added` set to `[]` and every other field kept
pub fn cleared_document(document: &str) -> Result<String, RecordParseError> {
    let mut value: Value = serde_json::from_str(document)?;
    let fields = value.as_object_mut().ok_or(RecordParseError::NotAnObject)?;
    fields.insert(FIELD_ADDED.to_string(), Value::Array(Vec::new()));
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CollectionRecord;
    use crate::observer::testing::RecordingObserver;

    fn entry(key: &str, value: &str) -> CatalogEntry {
        CatalogEntry {
            key: key.to_string(),
            record: CollectionRecord::collection(key, value.to_string(), 1, "1"),
        }
    }

    fn stamp() -> WriteStamp {
        WriteStamp {
            timestamp: 100,
            version: "20261014".to_string(),
        }
    }

    #[test]
    fn clears_added_in_place() {
        let cleared = cleared_document(
            r#"{"id":"uc-x","name":"RPG","added":[9,8],"removed":[7],"filterSpec":{"nFormatVersion":1,"strSearchText":""}}"#,
        )
        .unwrap();
        assert_eq!(
            cleared,
            r#"{"id":"uc-x","name":"RPG","added":[],"removed":[7],"filterSpec":{"nFormatVersion":1,"strSearchText":""}}"#
        );
    }

    #[test]
    fn adds_missing_added_field() {
        assert_eq!(
            cleared_document(r#"{"id":"hidden"}"#).unwrap(),
            r#"{"id":"hidden","added":[]}"#
        );
    }

    #[test]
    fn rejects_non_object_documents() {
        assert!(matches!(cleared_document("[1,2]"), Err(RecordParseError::NotAnObject)));
        assert!(matches!(cleared_document("{oops"), Err(RecordParseError::Json(_))));
    }

    #[test]
    fn emptied_records_take_the_new_stamp() {
        let entries = vec![entry("user-collections.uc-a", r#"{"id":"uc-a","added":[1]}"#)];

        let reset = reset_added(&entries, &stamp(), &RecordingObserver::default());

        let record = &reset[0].record;
        assert_eq!(record.timestamp(), Some(100));
        assert_eq!(record.version(), Some("20261014"));
        let keys: Vec<&str> = record.fields().keys().map(String::as_str).collect();
        let original: Vec<&str> = entries[0].record.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, original);
    }

    #[test]
    fn skips_broken_records_and_foreign_keys() {
        let entries = vec![
            entry("user-collections.uc-a", r#"{"id":"uc-a","added":[1]}"#),
            entry("user-collections.uc-b", "{broken"),
            entry("showcases.1", r#"{"id":"s","added":[1]}"#),
        ];
        let observer = RecordingObserver::default();

        let reset = reset_added(&entries, &stamp(), &observer);

        assert_eq!(reset[0].record.value(), Some(r#"{"id":"uc-a","added":[]}"#));
        assert_eq!(reset[1], entries[1]);
        assert_eq!(reset[2], entries[2]);
        assert_eq!(*observer.skipped.borrow(), vec!["user-collections.uc-b".to_string()]);
    }
}
