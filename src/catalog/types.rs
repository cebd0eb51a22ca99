// Catalog record model
//
// Steam persists collections as an array of [key, record] pairs. Each record's
// "value" is itself a JSON document serialized into a string. Records are kept
// as ordered JSON maps so fields this crate never touches survive a rewrite
// exactly as Steam wrote them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::encoding::TextEncoding;

/// Steam game (or shortcut) identifier as stored in `added` / `removed`
pub type GameId = i64;

pub const FIELD_KEY: &str = "key";
pub const FIELD_TIMESTAMP: &str = "timestamp";
pub const FIELD_IS_DELETED: &str = "is_deleted";
pub const FIELD_VALUE: &str = "value";
pub const FIELD_VERSION: &str = "version";
pub const FIELD_CONFLICT_METHOD: &str = "conflictResolutionMethod";
pub const FIELD_METHOD_ID: &str = "strMethodId";

/// Conflict-resolution tags telling Steam how to combine concurrent writes
pub const CONFLICT_RESOLUTION_METHOD: &str = "custom";
pub const UNION_METHOD_ID: &str = "union-collections";

/// One catalog record (the object half of a `[key, record]` pair)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionRecord(Map<String, Value>);

impl CollectionRecord {
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build a record the way Steam writes a live collection
    pub fn collection(key: &str, document: String, timestamp: i64, version: &str) -> Self {
        let mut fields = Map::new();
        fields.insert(FIELD_KEY.to_string(), Value::from(key));
        fields.insert(FIELD_TIMESTAMP.to_string(), Value::from(timestamp));
        fields.insert(FIELD_VALUE.to_string(), Value::from(document));
        fields.insert(FIELD_VERSION.to_string(), Value::from(version));
        fields.insert(
            FIELD_CONFLICT_METHOD.to_string(),
            Value::from(CONFLICT_RESOLUTION_METHOD),
        );
        fields.insert(FIELD_METHOD_ID.to_string(), Value::from(UNION_METHOD_ID));
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn key(&self) -> Option<&str> {
        self.0.get(FIELD_KEY).and_then(Value::as_str)
    }

    pub fn timestamp(&self) -> Option<i64> {
        self.0.get(FIELD_TIMESTAMP).and_then(Value::as_i64)
    }

    /// Overwrites the timestamp in place; a missing field is appended
    pub fn set_timestamp(&mut self, timestamp: i64) {
        self.0.insert(FIELD_TIMESTAMP.to_string(), Value::from(timestamp));
    }

    pub fn is_deleted(&self) -> bool {
        self.0
            .get(FIELD_IS_DELETED)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// The nested collection document, still serialized
    pub fn value(&self) -> Option<&str> {
        self.0.get(FIELD_VALUE).and_then(Value::as_str)
    }

    pub fn set_value(&mut self, document: String) {
        self.0.insert(FIELD_VALUE.to_string(), Value::from(document));
    }

    pub fn version(&self) -> Option<&str> {
        self.0.get(FIELD_VERSION).and_then(Value::as_str)
    }

    pub fn set_version(&mut self, version: &str) {
        self.0.insert(FIELD_VERSION.to_string(), Value::from(version));
    }

    pub fn conflict_resolution_method(&self) -> Option<&str> {
        self.0.get(FIELD_CONFLICT_METHOD).and_then(Value::as_str)
    }

    pub fn method_id(&self) -> Option<&str> {
        self.0.get(FIELD_METHOD_ID).and_then(Value::as_str)
    }

    /// Parse the nested document into its typed form
    pub fn collection_value(&self) -> Option<Result<CollectionValue, serde_json::Error>> {
        self.value().map(serde_json::from_str::<CollectionValue>)
    }
}

/// Search filter carried by dynamic collections
///
/// Only the fields this crate reads are typed; the full filter survives in
/// the raw record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(rename = "nFormatVersion")]
    pub format_version: i64,
    #[serde(rename = "strSearchText", default)]
    pub search_text: String,
}

/// The nested document stored (as a string) in a record's `value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionValue {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub added: Vec<GameId>,
    #[serde(default)]
    pub removed: Vec<GameId>,
    #[serde(rename = "filterSpec", default, skip_serializing_if = "Option::is_none")]
    pub filter_spec: Option<FilterSpec>,
}

impl CollectionValue {
    /// Compact JSON text in Steam's field order
    pub fn to_document(&self) -> String {
        let mut doc = json!({
            "id": self.id,
            "name": self.name,
            "added": self.added,
            "removed": self.removed,
        });
        if let Some(spec) = &self.filter_spec {
            doc["filterSpec"] = json!({
                "nFormatVersion": spec.format_version,
                "strSearchText": spec.search_text,
            });
        }
        doc.to_string()
    }

    /// Dynamic collections are defined by a filter rather than a member list
    pub fn is_dynamic(&self) -> bool {
        self.filter_spec.is_some()
    }
}

/// One `[key, record]` pair
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub key: String,
    pub record: CollectionRecord,
}

/// The ordered catalog of one account, plus the text encoding it came in
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    encoding: TextEncoding,
}

impl Catalog {
    pub fn new(encoding: TextEncoding) -> Self {
        Self {
            entries: Vec::new(),
            encoding,
        }
    }

    pub fn from_entries(entries: Vec<CatalogEntry>, encoding: TextEncoding) -> Self {
        Self { entries, encoding }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<CatalogEntry> {
        self.entries
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, key: impl Into<String>, record: CollectionRecord) {
        self.entries.push(CatalogEntry {
            key: key.into(),
            record,
        });
    }

    /// Record for a key; with duplicate keys the last pair wins
    pub fn get(&self, key: &str) -> Option<&CollectionRecord> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.record)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }
}

/// A live collection as the read side sees it
#[derive(Debug, Clone, PartialEq)]
pub struct SteamCollection {
    pub key: String,
    pub value: CollectionValue,
}
