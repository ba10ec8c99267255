//! Repository layer: note storage and durable settings.

pub mod note_repo;
pub mod settings_repo;
