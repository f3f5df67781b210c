use notecoach::db::{NoteInput, NoteStore};
use notecoach::error::CoachError;

fn test_store() -> NoteStore {
    NoteStore::open(":memory:").unwrap()
}

fn input(content: &str) -> NoteInput {
    NoteInput {
        content: content.into(),
        ..Default::default()
    }
}

#[test]
fn save_inserts_note_and_project_together() {
    let store = test_store();
    let id = store.save_note(input("first note"), "work").unwrap();
    assert_eq!(id, 1);
    let stats = store.stats();
    assert_eq!(stats.notes, 1);
    assert_eq!(stats.projects, 1);
}

#[test]
fn save_is_idempotent_on_project_rows() {
    let store = test_store();
    store.save_note(input("one"), "work").unwrap();
    store.save_note(input("two"), "work").unwrap();
    let stats = store.stats();
    assert_eq!(stats.notes, 2);
    assert_eq!(stats.projects, 1);
}

#[test]
fn invalid_content_inserts_nothing() {
    let store = test_store();
    let err = store.save_note(input("   "), "work").unwrap_err();
    assert!(matches!(err, CoachError::EmptyContent));
    let stats = store.stats();
    assert_eq!(stats.notes, 0);
    assert_eq!(stats.projects, 0);
}

#[test]
fn content_cap_is_8192_chars() {
    let store = test_store();
    store.save_note(input(&"x".repeat(8192)), "work").unwrap();

    let err = store.save_note(input(&"x".repeat(8193)), "work").unwrap_err();
    assert!(matches!(err, CoachError::ContentTooLong));
    assert_eq!(store.stats().notes, 1);
}

#[test]
fn auto_description_written_once() {
    let store = test_store();
    store.save_note(input("one"), "fitness").unwrap();
    store.save_note(input("two"), "fitness").unwrap();
    let ctx = store.project_context("fitness", 20).unwrap();
    assert_eq!(
        ctx.description.as_deref(),
        Some("Auto-detected project for fitness related notes")
    );
}

#[test]
fn search_orders_newest_first() {
    let store = test_store();
    for content in ["one", "two", "three"] {
        store.save_note(input(content), "journal").unwrap();
    }
    let notes = store.search_notes(None, None).unwrap();
    let contents: Vec<&str> = notes.iter().map(|n| n.content.as_str()).collect();
    assert_eq!(contents, ["three", "two", "one"]);
}

#[test]
fn search_matches_raw_substring_case_sensitively() {
    let store = test_store();
    store.save_note(input("Budget Planning"), "finance").unwrap();

    assert_eq!(store.search_notes(Some("budget"), None).unwrap().len(), 0);
    assert_eq!(store.search_notes(Some("Budget"), None).unwrap().len(), 1);
    assert_eq!(store.search_notes(Some("et Pl"), None).unwrap().len(), 1);
    // whitespace-only queries are treated as absent
    assert_eq!(store.search_notes(Some("   "), None).unwrap().len(), 1);
}

#[test]
fn search_filters_by_project() {
    let store = test_store();
    store.save_note(input("work note"), "work").unwrap();
    store.save_note(input("money note"), "finance").unwrap();

    let work = store.search_notes(None, Some("work")).unwrap();
    assert_eq!(work.len(), 1);
    assert_eq!(work[0].content, "work note");

    assert_eq!(store.search_notes(None, Some("missing")).unwrap().len(), 0);
    // an empty filter is ignored, not matched literally
    assert_eq!(store.search_notes(None, Some("")).unwrap().len(), 2);
}

#[test]
fn search_caps_at_50_most_recent() {
    let store = test_store();
    for i in 0..55 {
        store.save_note(input(&format!("note {i}")), "bulk").unwrap();
    }
    let notes = store.search_notes(None, None).unwrap();
    assert_eq!(notes.len(), 50);
    assert_eq!(notes[0].content, "note 54");
    assert_eq!(notes[49].content, "note 5");
}

#[test]
fn tags_round_trip_in_order() {
    let store = test_store();
    let note = NoteInput {
        content: "gear list".into(),
        tags: Some(vec!["z".into(), "a".into(), "m".into()]),
        ..Default::default()
    };
    store.save_note(note, "fitness").unwrap();
    let notes = store.search_notes(None, None).unwrap();
    assert_eq!(notes[0].tags, ["z", "a", "m"]);
    // same order through the context query
    let ctx = store.project_context("fitness", 20).unwrap();
    assert_eq!(ctx.notes[0].tags, ["z", "a", "m"]);
}

#[test]
fn context_respects_limit_and_order() {
    let store = test_store();
    for content in ["old", "mid", "new"] {
        store.save_note(input(content), "journal").unwrap();
    }
    let ctx = store.project_context("journal", 2).unwrap();
    assert_eq!(ctx.notes.len(), 2);
    assert_eq!(ctx.notes[0].content, "new");
    assert_eq!(ctx.notes[1].content, "mid");
}

#[test]
fn context_unknown_project_is_empty() {
    let store = test_store();
    let ctx = store.project_context("ghost", 20).unwrap();
    assert!(ctx.description.is_none());
    assert!(ctx.notes.is_empty());
}
