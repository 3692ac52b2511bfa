//! Merge-semantics tests against the library API: ordering, in-place
//! overwrites, idempotence, and snapshot persistence through the file store.

use pirepe::import;
use pirepe::model::item::ItemKind;
use pirepe::reconcile::Policy;
use pirepe::store::{JsonFileStore, LibraryStore, MemoryStore};

fn patterns_payload(items: &[(&str, &str)]) -> Vec<u8> {
    let items: Vec<String> = items
        .iter()
        .map(|(slug, content)| {
            format!(r#"{{"slug": "{slug}", "title": "{slug}", "content": "{content}"}}"#)
        })
        .collect();
    format!(r#"{{"patterns": [{}]}}"#, items.join(",")).into_bytes()
}

fn pattern_slugs(store: &dyn LibraryStore) -> Vec<String> {
    store
        .load()
        .unwrap()
        .patterns
        .iter()
        .map(|p| p.slug.to_string())
        .collect()
}

#[test]
fn new_items_append_in_incoming_order() {
    let store = MemoryStore::default();
    import::run(&store, &patterns_payload(&[("a", "1"), ("b", "2")]), Policy::Skip, 10).unwrap();
    import::run(&store, &patterns_payload(&[("d", "4"), ("c", "3")]), Policy::Skip, 10).unwrap();
    assert_eq!(pattern_slugs(&store), ["a", "b", "d", "c"]);
}

#[test]
fn overwrite_keeps_position_of_original_entry() {
    let store = MemoryStore::default();
    import::run(
        &store,
        &patterns_payload(&[("a", "1"), ("b", "2"), ("c", "3")]),
        Policy::Skip,
        10,
    )
    .unwrap();
    import::run(&store, &patterns_payload(&[("b", "new")]), Policy::Overwrite, 10).unwrap();

    assert_eq!(pattern_slugs(&store), ["a", "b", "c"]);
    assert_eq!(store.load().unwrap().patterns[1].content, "new");
}

#[test]
fn skip_then_overwrite_converges_to_incoming() {
    let store = MemoryStore::default();
    let v1 = patterns_payload(&[("a", "old")]);
    let v2 = patterns_payload(&[("a", "new"), ("b", "2")]);

    import::run(&store, &v1, Policy::Skip, 10).unwrap();
    import::run(&store, &v2, Policy::Skip, 10).unwrap();
    assert_eq!(store.load().unwrap().patterns[0].content, "old");

    import::run(&store, &v2, Policy::Overwrite, 10).unwrap();
    let lib = store.load().unwrap();
    assert_eq!(lib.patterns[0].content, "new");
    assert_eq!(lib.patterns.len(), 2);
}

#[test]
fn reimporting_is_idempotent_under_both_policies() {
    for policy in [Policy::Skip, Policy::Overwrite] {
        let store = MemoryStore::default();
        let payload = patterns_payload(&[("a", "1"), ("b", "2")]);
        import::run(&store, &payload, policy, 10).unwrap();
        let once = store.load().unwrap();
        import::run(&store, &payload, policy, 10).unwrap();
        assert_eq!(store.load().unwrap(), once, "policy {policy}");
    }
}

#[test]
fn collections_are_reconciled_independently() {
    let store = MemoryStore::default();
    let payload = br#"{
        "patterns": [{"slug": "shared", "title": "P", "content": "pattern"}],
        "templates": [{"slug": "shared", "title": "T", "content": "template"}]
    }"#;
    import::run(&store, payload, Policy::Skip, 10).unwrap();
    let summary = import::run(&store, payload, Policy::Skip, 10).unwrap();

    // The same slug in two kinds is two distinct logical entities.
    let lib = store.load().unwrap();
    assert_eq!(lib.count(ItemKind::Patterns), 1);
    assert_eq!(lib.count(ItemKind::Templates), 1);
    for c in &summary.collections {
        match c.kind {
            ItemKind::Patterns | ItemKind::Templates => assert_eq!(c.skipped_total, 1),
            _ => assert_eq!(c.skipped_total, 0),
        }
    }
}

#[test]
fn file_store_snapshot_survives_process_boundaries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");

    {
        let store = JsonFileStore::new(&path);
        import::run(
            &store,
            &patterns_payload(&[("a", "1"), ("b", "2")]),
            Policy::Skip,
            10,
        )
        .unwrap();
    }

    // A brand-new store over the same file sees the merged state.
    let store = JsonFileStore::new(&path);
    import::run(&store, &patterns_payload(&[("b", "new"), ("c", "3")]), Policy::Skip, 10)
        .unwrap();
    assert_eq!(pattern_slugs(&store), ["a", "b", "c"]);
    assert_eq!(store.load().unwrap().patterns[1].content, "2");
}
