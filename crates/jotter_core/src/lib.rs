//! Data layer for the Jotter notes application.
//!
//! Two independent components, consumed by an embedding UI:
//! - [`InMemoryNoteRepository`]: process-lifetime note CRUD.
//! - [`SqliteSettingsRepository`]: the persisted high-contrast flag,
//!   observable through [`FlagSubscription`].

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteId};
pub use repo::note_repo::{InMemoryNoteRepository, NoteRepository};
pub use repo::settings_repo::{
    FlagSubscription, SettingsError, SettingsRepository, SettingsResult, SqliteSettingsRepository,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
