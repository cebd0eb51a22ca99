// Canonical membership map built from a snapshot

use std::collections::{BTreeSet, HashMap};

use crate::catalog::GameId;
use crate::collection_id::{FAVORITE_KEY, HIDDEN_KEY, category_document_id, collection_key};
use crate::merge::types::MembershipEntry;
use crate::snapshot::MembershipSnapshot;

pub const HIDDEN_ID: &str = "hidden";
pub const HIDDEN_NAME: &str = "HIDDEN";
pub const FAVORITE_ID: &str = "favorite";
pub const FAVORITE_NAME: &str = "FAVORITE";

/// Display form of a category name
pub fn canonical_name(name: &str) -> String {
    name.to_uppercase()
}

/// Identity form of a category name; names equal under this form share a collection
pub fn folded_name(name: &str) -> String {
    name.to_lowercase()
}

/// Every collection the snapshot calls for, in a stable order
///
/// Hidden and favorite come first, then the authoritative category list,
/// then categories only met on games.
pub fn canonical_membership(snapshot: &MembershipSnapshot) -> Vec<MembershipEntry> {
    let mut entries = vec![
        reserved(HIDDEN_KEY, HIDDEN_ID, HIDDEN_NAME, snapshot.hidden_games()),
        reserved(FAVORITE_KEY, FAVORITE_ID, FAVORITE_NAME, snapshot.favorite_games()),
    ];
    let mut slots: HashMap<String, usize> = HashMap::new();

    for name in &snapshot.categories {
        category_slot(&mut entries, &mut slots, name);
    }

    for game in &snapshot.games {
        for name in &game.categories {
            let slot = category_slot(&mut entries, &mut slots, name);
            entries[slot].members.insert(game.id);
        }
    }

    entries
}

fn reserved(
    key: &str,
    id: &str,
    name: &str,
    members: impl Iterator<Item = GameId>,
) -> MembershipEntry {
    MembershipEntry {
        key: key.to_string(),
        id: id.to_string(),
        name: name.to_string(),
        members: members.collect(),
    }
}

fn category_slot(
    entries: &mut Vec<MembershipEntry>,
    slots: &mut HashMap<String, usize>,
    name: &str,
) -> usize {
    let folded = folded_name(name);
    if let Some(&slot) = slots.get(&folded) {
        return slot;
    }

    let slot = entries.len();
    entries.push(MembershipEntry {
        key: collection_key(&folded),
        id: category_document_id(&folded),
        name: canonical_name(name),
        members: BTreeSet::new(),
    });
    slots.insert(folded, slot);
    slot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::GameMembership;

    fn names(entries: &[MembershipEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn reserved_collections_come_first() {
        let entries = canonical_membership(&MembershipSnapshot::new());
        assert_eq!(names(&entries), ["HIDDEN", "FAVORITE"]);
        assert_eq!(entries[0].key, HIDDEN_KEY);
        assert_eq!(entries[1].key, FAVORITE_KEY);
        assert!(entries.iter().all(|e| e.members.is_empty()));
    }

    #[test]
    fn authoritative_categories_exist_without_members() {
        let snapshot = MembershipSnapshot::new()
            .with_category("Strategy")
            .with_game(GameMembership::new(4).in_category("Puzzle"));
        let entries = canonical_membership(&snapshot);
        assert_eq!(names(&entries), ["HIDDEN", "FAVORITE", "STRATEGY", "PUZZLE"]);
        assert!(entries[2].members.is_empty());
        assert_eq!(entries[3].members, BTreeSet::from([4]));
    }

    #[test]
    fn names_differing_by_case_collapse() {
        let snapshot = MembershipSnapshot::new()
            .with_category("Action")
            .with_category("ACTION")
            .with_game(GameMembership::new(9).in_category("action"))
            .with_game(GameMembership::new(3).in_category("AcTiOn"));
        let entries = canonical_membership(&snapshot);
        assert_eq!(names(&entries), ["HIDDEN", "FAVORITE", "ACTION"]);
        assert_eq!(entries[2].key, collection_key("action"));
        assert_eq!(entries[2].id, category_document_id("Action"));
        assert_eq!(entries[2].members.iter().copied().collect::<Vec<_>>(), vec![3, 9]);
    }

    #[test]
    fn identity_comes_from_the_lowercase_form() {
        let snapshot = MembershipSnapshot::new()
            .with_category("Straße")
            .with_game(GameMembership::new(5).in_category("STRASSE"));
        let entries = canonical_membership(&snapshot);

        assert_eq!(names(&entries), ["HIDDEN", "FAVORITE", "STRASSE", "STRASSE"]);
        assert_eq!(entries[2].key, collection_key("Straße"));
        assert_eq!(entries[2].id, category_document_id("straße"));
        assert_eq!(entries[3].key, collection_key("strasse"));
        assert_ne!(entries[2].key, entries[3].key);
    }

    #[test]
    fn members_are_deduplicated() {
        let snapshot = MembershipSnapshot::new()
            .with_game(GameMembership::new(1).in_category("RPG").in_category("rpg").hidden())
            .with_game(GameMembership::new(1).hidden().favorite());
        let entries = canonical_membership(&snapshot);
        assert_eq!(entries[0].members, BTreeSet::from([1]));
        assert_eq!(entries[1].members, BTreeSet::from([1]));
        assert_eq!(entries[2].members, BTreeSet::from([1]));
    }
}
