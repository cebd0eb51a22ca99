// Read-side view of the live collections in a catalog

use crate::catalog::types::{Catalog, SteamCollection};
use crate::collection_id::is_collection_key;
use crate::error::RecordParseError;
use crate::observer::SyncObserver;

/// Every non-deleted collection whose nested document parses
///
/// Broken nested documents are reported to the observer and skipped.
pub fn live_collections(catalog: &Catalog, observer: &dyn SyncObserver) -> Vec<SteamCollection> {
    let mut collections = Vec::new();

    for entry in catalog.entries() {
        let record = &entry.record;
        if !is_collection_key(&entry.key) || record.is_deleted() {
            continue;
        }
        match record.collection_value() {
            Some(Ok(value)) => collections.push(SteamCollection {
                key: entry.key.clone(),
                value,
            }),
            Some(Err(e)) => observer.record_skipped(&entry.key, &RecordParseError::from(e)),
            None => {}
        }
    }

    collections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::encoding::TextEncoding;
    use crate::catalog::pure::codec::decode;
    use crate::observer::testing::RecordingObserver;

    #[test]
    fn lists_live_collections_only() {
        let text = concat!(
            r#"[["user-collections.uc-a",{"key":"user-collections.uc-a","timestamp":1,"value":"{\"id\":\"uc-a\",\"name\":\"ACTION\",\"added\":[1],\"removed\":[]}"}],"#,
            r#"["user-collections.uc-b",{"key":"user-collections.uc-b","timestamp":1,"is_deleted":true}],"#,
            r#"["user-collections.uc-c",{"key":"user-collections.uc-c","timestamp":1,"value":"not json"}],"#,
            r#"["user-collections.uc-d",{"key":"user-collections.uc-d","timestamp":1,"value":"{\"id\":\"uc-d\",\"name\":\"COOP\",\"added\":[],\"removed\":[],\"filterSpec\":{\"nFormatVersion\":2,\"strSearchText\":\"coop\"}}"}],"#,
            r#"["showcases.1",{"key":"showcases.1","timestamp":1,"value":"{\"id\":\"x\"}"}]]"#
        );
        let catalog = decode(text.as_bytes(), TextEncoding::Utf8).unwrap();
        let observer = RecordingObserver::default();

        let collections = live_collections(&catalog, &observer);

        let keys: Vec<&str> = collections.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, ["user-collections.uc-a", "user-collections.uc-d"]);
        assert_eq!(collections[0].value.name, "ACTION");
        assert!(collections[1].value.is_dynamic());
        assert_eq!(*observer.skipped.borrow(), vec!["user-collections.uc-c".to_string()]);
    }
}
