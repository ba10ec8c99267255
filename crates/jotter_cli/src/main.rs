//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `jotter_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use jotter_core::{InMemoryNoteRepository, NoteRepository};

fn main() {
    println!("jotter_core ping={}", jotter_core::ping());
    println!("jotter_core version={}", jotter_core::core_version());

    // Seeded store exercises the CRUD path without any host UI.
    let repo = InMemoryNoteRepository::with_sample_notes();
    for note in repo.list() {
        println!("note id={} title={}", note.id, note.title);
    }
}
