//! Note repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Provide CRUD over the process-lifetime note collection.
//! - Keep list output deterministic regardless of insertion order.
//!
//! # Invariants
//! - `id` is assigned once by `add` and never reassigned or reused.
//! - `update` replaces the whole record; there are no partial updates.
//! - Missing ids are reported as data (`Option`/`bool`), never as errors.

use crate::model::note::{Note, NoteId};
use log::debug;
use std::collections::HashMap;
use std::sync::RwLock;

/// Repository interface for note CRUD operations.
///
/// Every operation is individually atomic; there is no cross-operation
/// transaction. Callers that need read-modify-write merge the record
/// themselves before calling [`NoteRepository::update`].
pub trait NoteRepository: Send + Sync {
    /// Returns all notes sorted by lowercased title, ties broken by id.
    fn list(&self) -> Vec<Note>;
    /// Returns the note with the given id, or `None`.
    fn get(&self, id: NoteId) -> Option<Note>;
    /// Creates a note with a fresh id and returns the stored record.
    fn add(&self, title: &str, body: &str) -> Note;
    /// Replaces an existing note wholesale. Returns whether it existed.
    fn update(&self, note: Note) -> bool;
    /// Removes the note with the given id. Returns whether it existed.
    fn delete(&self, id: NoteId) -> bool;
    /// Removes all notes unconditionally.
    fn clear(&self);
}

/// In-memory note repository backed by a lock-protected map.
///
/// Safe for concurrent use from multiple threads; the map is the single
/// mutation path for note state.
pub struct InMemoryNoteRepository {
    notes: RwLock<HashMap<NoteId, Note>>,
}

impl InMemoryNoteRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            notes: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a repository pre-populated with first-run sample notes.
    pub fn with_sample_notes() -> Self {
        let repo = Self::new();
        let samples = [
            Note::new(
                "Welcome",
                "This is your notes app. Tap + to create a note.",
            ),
            Note::new(
                "Ideas",
                "\u{2022} Grocery list\n\u{2022} Project thoughts\n\u{2022} Books to read",
            ),
            Note::new(
                "Tips",
                "Use the + button to create a note.\nLong notes are collapsed in the list.",
            ),
        ];
        {
            let mut notes = write_guard(&repo.notes);
            for note in samples {
                notes.insert(note.id, note);
            }
        }
        repo
    }
}

impl Default for InMemoryNoteRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteRepository for InMemoryNoteRepository {
    fn list(&self) -> Vec<Note> {
        let mut notes: Vec<Note> = read_guard(&self.notes).values().cloned().collect();
        notes.sort_by(|a, b| {
            (a.title.to_lowercase(), a.id).cmp(&(b.title.to_lowercase(), b.id))
        });
        notes
    }

    fn get(&self, id: NoteId) -> Option<Note> {
        read_guard(&self.notes).get(&id).cloned()
    }

    fn add(&self, title: &str, body: &str) -> Note {
        let note = Note::new(title, body);
        write_guard(&self.notes).insert(note.id, note.clone());
        debug!("event=note_add module=note_repo status=ok id={}", note.id);
        note
    }

    fn update(&self, note: Note) -> bool {
        let mut notes = write_guard(&self.notes);
        if !notes.contains_key(&note.id) {
            debug!(
                "event=note_update module=note_repo status=not_found id={}",
                note.id
            );
            return false;
        }
        notes.insert(note.id, note);
        true
    }

    fn delete(&self, id: NoteId) -> bool {
        let removed = write_guard(&self.notes).remove(&id).is_some();
        debug!(
            "event=note_delete module=note_repo status={} id={id}",
            if removed { "ok" } else { "not_found" }
        );
        removed
    }

    fn clear(&self) {
        let mut notes = write_guard(&self.notes);
        let count = notes.len();
        notes.clear();
        debug!("event=note_clear module=note_repo status=ok removed={count}");
    }
}

// A poisoned lock still guards a structurally valid map, so recover the
// guard instead of surfacing the poison to every caller.
fn read_guard<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_guard<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
