// Outer catalog codec: bytes <-> ordered [key, record] pairs
//
// The nested "value" document is left as an opaque string here.

use serde_json::Value;

use crate::catalog::encoding::TextEncoding;
use crate::catalog::types::{Catalog, CatalogEntry, CollectionRecord};
use crate::error::{DecodeError, EncodeError};
use crate::observer::SyncObserver;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Decode catalog bytes stored in `encoding`
///
/// Any malformed element fails the whole decode.
pub fn decode(bytes: &[u8], encoding: TextEncoding) -> Result<Catalog, DecodeError> {
    decode_with(bytes, encoding, |_, error| Err(error))
}

/// Read-side decode: malformed elements are reported and left out
///
/// Only the top-level shape is fatal. A catalog decoded this way is for
/// display and must not be committed back.
pub fn decode_lenient(
    bytes: &[u8],
    encoding: TextEncoding,
    observer: &dyn SyncObserver,
) -> Result<Catalog, DecodeError> {
    decode_with(bytes, encoding, |index, error| {
        observer.pair_skipped(index, &error);
        Ok(())
    })
}

fn decode_with(
    bytes: &[u8],
    encoding: TextEncoding,
    mut on_malformed: impl FnMut(usize, DecodeError) -> Result<(), DecodeError>,
) -> Result<Catalog, DecodeError> {
    let text = encoding.decode(bytes)?;
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(&text);

    let document: Value = serde_json::from_str(text).map_err(DecodeError::Json)?;
    let Value::Array(items) = document else {
        return Err(DecodeError::NotAnArray {
            found: json_kind(&document),
        });
    };

    let mut entries = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match decode_pair(index, item) {
            Ok(entry) => entries.push(entry),
            Err(error) => on_malformed(index, error)?,
        }
    }

    Ok(Catalog::from_entries(entries, encoding))
}

fn decode_pair(index: usize, item: Value) -> Result<CatalogEntry, DecodeError> {
    let malformed = |reason| DecodeError::MalformedPair { index, reason };

    let Value::Array(pair) = item else {
        return Err(malformed("element is not an array"));
    };
    let [key, record]: [Value; 2] = pair
        .try_into()
        .map_err(|_| malformed("element does not have exactly two items"))?;
    let Value::String(key) = key else {
        return Err(malformed("key is not a string"));
    };
    let Value::Object(record) = record else {
        return Err(malformed("record is not an object"));
    };

    Ok(CatalogEntry {
        key,
        record: CollectionRecord::from_map(record),
    })
}

/// Compact JSON text of the catalog
pub fn encode_text(catalog: &Catalog) -> Result<String, EncodeError> {
    let pairs: Vec<(&str, &CollectionRecord)> = catalog
        .entries()
        .iter()
        .map(|entry| (entry.key.as_str(), &entry.record))
        .collect();
    Ok(serde_json::to_string(&pairs)?)
}

/// Encode the catalog in `encoding`
pub fn encode(catalog: &Catalog, encoding: TextEncoding) -> Result<Vec<u8>, EncodeError> {
    encoding.encode(&encode_text(catalog)?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
