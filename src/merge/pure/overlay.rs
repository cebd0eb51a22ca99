// Record synthesis and the keyed structural merge

use std::collections::HashMap;

use crate::catalog::{CatalogEntry, CollectionRecord, CollectionValue};
use crate::merge::types::{MembershipEntry, WriteStamp};

/// Fresh catalog entry for one membership entry
pub fn synthesize(entry: &MembershipEntry, stamp: &WriteStamp) -> CatalogEntry {
    let value = CollectionValue {
        id: entry.id.clone(),
        name: entry.name.clone(),
        added: entry.members.iter().copied().collect(),
        removed: Vec::new(),
        filter_spec: None,
    };
    CatalogEntry {
        key: entry.key.clone(),
        record: CollectionRecord::collection(
            &entry.key,
            value.to_document(),
            stamp.timestamp,
            &stamp.version,
        ),
    }
}

/// Keyed union of `base` and `overlay`
///
/// A key keeps the position of its first occurrence and the record of its
/// last one, so overlay records replace base records in place and new keys
/// are appended in overlay order.
pub fn overlay(base: Vec<CatalogEntry>, overlay: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
    let mut merged: Vec<CatalogEntry> = Vec::with_capacity(base.len() + overlay.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for entry in base.into_iter().chain(overlay) {
        match positions.get(&entry.key) {
            Some(&position) => merged[position] = entry,
            None => {
                positions.insert(entry.key.clone(), merged.len());
                merged.push(entry);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn entry(key: &str, timestamp: i64) -> CatalogEntry {
        CatalogEntry {
            key: key.to_string(),
            record: CollectionRecord::collection(key, "{}".to_string(), timestamp, "1"),
        }
    }

    fn layout(entries: &[CatalogEntry]) -> Vec<(&str, Option<i64>)> {
        entries
            .iter()
            .map(|e| (e.key.as_str(), e.record.timestamp()))
            .collect()
    }

    #[test]
    fn overlay_replaces_in_place_and_appends_new_keys() {
        let merged = overlay(
            vec![entry("a", 1), entry("b", 1), entry("c", 1)],
            vec![entry("d", 2), entry("b", 2)],
        );
        assert_eq!(
            layout(&merged),
            [("a", Some(1)), ("b", Some(2)), ("c", Some(1)), ("d", Some(2))]
        );
    }

    #[test]
    fn later_base_duplicate_supersedes_earlier() {
        let merged = overlay(vec![entry("a", 1), entry("b", 1), entry("a", 3)], vec![]);
        assert_eq!(layout(&merged), [("a", Some(3)), ("b", Some(1))]);
    }

    #[test]
    fn synthesized_record_carries_members_and_stamp() {
        let membership = MembershipEntry {
            key: "user-collections.uc-abc".into(),
            id: "uc-abc".into(),
            name: "ACTION".into(),
            members: BTreeSet::from([5, 1]),
        };
        let stamp = WriteStamp {
            timestamp: 1_700_000_000,
            version: "20231114".into(),
        };

        let entry = synthesize(&membership, &stamp);

        assert_eq!(entry.key, "user-collections.uc-abc");
        assert_eq!(entry.record.key(), Some("user-collections.uc-abc"));
        assert_eq!(entry.record.timestamp(), Some(1_700_000_000));
        assert_eq!(entry.record.version(), Some("20231114"));
        assert_eq!(
            entry.record.value(),
            Some(r#"{"id":"uc-abc","name":"ACTION","added":[1,5],"removed":[]}"#)
        );
    }
}
