use jotter_core::{InMemoryNoteRepository, Note, NoteRepository};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use uuid::Uuid;

#[test]
fn add_and_get_roundtrip() {
    let repo = InMemoryNoteRepository::new();

    let created = repo.add("Title", "Body");
    assert!(!created.id.is_nil());

    let loaded = repo.get(created.id).unwrap();
    assert_eq!(loaded.id, created.id);
    assert_eq!(loaded.title, "Title");
    assert_eq!(loaded.body, "Body");
}

#[test]
fn get_unknown_id_returns_none() {
    let repo = InMemoryNoteRepository::new();
    repo.add("present", "");

    assert!(repo.get(Uuid::new_v4()).is_none());
}

#[test]
fn list_sorts_by_lowercased_title_regardless_of_insertion_order() {
    let repo = InMemoryNoteRepository::new();
    repo.add("Zebra", "");
    repo.add("apple", "");

    let titles: Vec<String> = repo.list().into_iter().map(|n| n.title).collect();
    assert_eq!(titles, ["apple", "Zebra"]);
}

#[test]
fn list_breaks_title_ties_by_id_ascending() {
    let repo = InMemoryNoteRepository::new();
    let first = repo.add("same", "a");
    let second = repo.add("same", "b");
    let third = repo.add("Same", "c");

    let mut expected = vec![first.id, second.id, third.id];
    expected.sort();

    let listed: Vec<_> = repo.list().into_iter().map(|n| n.id).collect();
    assert_eq!(listed, expected);
}

#[test]
fn seeded_samples_list_in_alpha_order() {
    let repo = InMemoryNoteRepository::with_sample_notes();

    let titles: Vec<String> = repo.list().into_iter().map(|n| n.title).collect();
    assert_eq!(titles, ["Ideas", "Tips", "Welcome"]);
}

#[test]
fn update_existing_note_replaces_fields_and_keeps_id() {
    let repo = InMemoryNoteRepository::new();
    let created = repo.add("draft", "old body");

    let edited = created.with_fields("final", "new body");
    assert!(repo.update(edited));

    let loaded = repo.get(created.id).unwrap();
    assert_eq!(loaded.id, created.id);
    assert_eq!(loaded.title, "final");
    assert_eq!(loaded.body, "new body");
}

#[test]
fn update_unknown_id_is_a_reported_noop() {
    let repo = InMemoryNoteRepository::new();
    repo.add("existing", "");
    let before = repo.list();

    let stranger = Note::new("ghost", "never stored");
    assert!(!repo.update(stranger));

    assert_eq!(repo.list(), before);
}

#[test]
fn delete_removes_existing_and_reports_missing() {
    let repo = InMemoryNoteRepository::new();
    let created = repo.add("to delete", "");

    assert!(repo.delete(created.id));
    assert!(repo.get(created.id).is_none());

    let before = repo.list();
    assert!(!repo.delete(created.id));
    assert_eq!(repo.list(), before);
}

#[test]
fn clear_empties_the_store() {
    let repo = InMemoryNoteRepository::with_sample_notes();
    repo.add("extra", "");

    repo.clear();
    assert!(repo.list().is_empty());
}

#[test]
fn generated_ids_never_collide_over_large_sample() {
    let repo = InMemoryNoteRepository::new();

    let mut seen = HashSet::new();
    for i in 0..10_000 {
        let note = repo.add(&format!("note {i}"), "");
        assert!(seen.insert(note.id), "duplicate id generated: {}", note.id);
    }
    assert_eq!(repo.list().len(), 10_000);
}

#[test]
fn concurrent_adds_lose_nothing() {
    let repo = Arc::new(InMemoryNoteRepository::new());
    let threads = 8;
    let per_thread = 100;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let repo = Arc::clone(&repo);
            thread::spawn(move || {
                for i in 0..per_thread {
                    repo.add(&format!("t{t} n{i}"), "");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let notes = repo.list();
    assert_eq!(notes.len(), threads * per_thread);

    let ids: HashSet<_> = notes.into_iter().map(|n| n.id).collect();
    assert_eq!(ids.len(), threads * per_thread);
}
