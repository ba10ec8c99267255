//! Note domain model.
//!
//! # Responsibility
//! - Define the note record shared by the store and its embedding UI.
//! - Provide constructors that own identifier generation.
//!
//! # Invariants
//! - `id` is stable for the lifetime of a note and never reused.
//! - Updates replace `title`/`body` wholesale; `id` never changes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// A user-authored text record.
///
/// The store imposes no validation on `title` or `body`; both may be
/// empty. Callers that require a non-empty title enforce it before
/// handing the record to a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable global ID, generated at creation.
    pub id: NoteId,
    /// Display title. May be empty as far as the store is concerned.
    pub title: String,
    /// Free-form body text. May be empty.
    pub body: String,
}

impl Note {
    /// Creates a note with a freshly generated random ID.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), title, body)
    }

    /// Creates a note with a caller-provided stable ID.
    ///
    /// Used by callers that already own an identity, e.g. when merging
    /// edits into an existing record before an `update`.
    pub fn with_id(id: NoteId, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Returns a copy of this note with replaced title/body and the same ID.
    pub fn with_fields(&self, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::with_id(self.id, title, body)
    }
}
