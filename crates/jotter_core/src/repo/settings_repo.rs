//! Durable settings repository with live-updating subscriptions.
//!
//! # Responsibility
//! - Own read/write access to the persisted user settings table.
//! - Fan out every successful write to open subscriptions, in write order.
//!
//! # Invariants
//! - A flag that was never written reads as `false`.
//! - Writes are serialized through the connection mutex; the persisted
//!   value is the last write to complete.
//! - Subscription registration and broadcast are ordered through the
//!   same mutex, so no write can fall between a subscription's initial
//!   read and its registration.

use crate::db::DbError;
use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

const HIGH_CONTRAST_KEY: &str = "high_contrast_enabled";

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Error for settings persistence and query operations.
#[derive(Debug)]
pub enum SettingsError {
    Db(DbError),
    InvalidData(String),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted setting: {message}"),
        }
    }
}

impl Error for SettingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for SettingsError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SettingsError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Live view of a boolean setting.
///
/// Yields the value current at subscription time first, then every
/// later write made through the owning repository. Identical
/// consecutive values are not deduplicated. The stream ends when the
/// repository is dropped.
#[derive(Debug)]
pub struct FlagSubscription {
    rx: Receiver<bool>,
}

impl FlagSubscription {
    /// Blocks for the next emission. `None` once the repository is gone.
    pub fn recv(&self) -> Option<bool> {
        self.rx.recv().ok()
    }

    /// Returns the next emission if one is already queued.
    pub fn try_recv(&self) -> Option<bool> {
        self.rx.try_recv().ok()
    }

    /// Blocks for the next emission up to `timeout`.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<bool> {
        self.rx.recv_timeout(timeout).ok()
    }
}

/// Repository interface for the persisted accessibility settings.
pub trait SettingsRepository: Send + Sync {
    /// Subscribes to the high-contrast flag.
    ///
    /// The subscription's first emission is the current persisted value,
    /// `false` when the flag was never written.
    fn high_contrast_enabled(&self) -> SettingsResult<FlagSubscription>;

    /// Durably persists the high-contrast flag.
    ///
    /// On success the new value is visible to subsequent reads and has
    /// been broadcast to open subscriptions. On failure nothing is
    /// emitted; callers may retry.
    fn set_high_contrast_enabled(&self, enabled: bool) -> SettingsResult<()>;
}

/// SQLite-backed settings repository.
///
/// Takes ownership of a migrated connection (see [`crate::db::open_db`]).
pub struct SqliteSettingsRepository {
    conn: Mutex<Connection>,
    subscribers: Mutex<Vec<Sender<bool>>>,
}

impl SqliteSettingsRepository {
    /// Wraps a ready connection. The connection must have migrations
    /// applied; `open_db`/`open_db_in_memory` guarantee that.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    fn read_flag(&self, conn: &Connection) -> SettingsResult<bool> {
        let stored: Option<i64> = conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1;",
                [HIGH_CONTRAST_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match stored {
            None | Some(0) => Ok(false),
            Some(1) => Ok(true),
            Some(other) => Err(SettingsError::InvalidData(format!(
                "invalid boolean value `{other}` for key `{HIGH_CONTRAST_KEY}`"
            ))),
        }
    }

    // Lock order is always conn then subscribers.
    fn lock_conn(&self) -> MutexGuard<'_, Connection> {
        self.conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_subscribers(&self) -> MutexGuard<'_, Vec<Sender<bool>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SettingsRepository for SqliteSettingsRepository {
    fn high_contrast_enabled(&self) -> SettingsResult<FlagSubscription> {
        let conn = self.lock_conn();
        let current = self.read_flag(&conn)?;

        let (tx, rx) = unbounded();
        // Queue the initial value before registering so the receiver
        // always sees it first; the conn lock keeps writes out until
        // registration is done.
        let _ = tx.send(current);
        self.lock_subscribers().push(tx);
        drop(conn);

        Ok(FlagSubscription { rx })
    }

    fn set_high_contrast_enabled(&self, enabled: bool) -> SettingsResult<()> {
        let conn = self.lock_conn();
        let result = conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![HIGH_CONTRAST_KEY, i64::from(enabled)],
        );

        if let Err(err) = result {
            error!(
                "event=settings_write module=settings_repo status=error key={HIGH_CONTRAST_KEY} error={err}"
            );
            return Err(err.into());
        }

        // Broadcast after the write has landed; drop senders whose
        // subscription side is gone.
        self.lock_subscribers()
            .retain(|tx| tx.send(enabled).is_ok());
        drop(conn);

        info!(
            "event=settings_write module=settings_repo status=ok key={HIGH_CONTRAST_KEY} value={enabled}"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{SettingsRepository, SqliteSettingsRepository, HIGH_CONTRAST_KEY};
    use crate::db::open_db_in_memory;

    #[test]
    fn invalid_persisted_value_is_rejected_on_read() {
        let conn = open_db_in_memory().unwrap();
        conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, 7);",
            [HIGH_CONTRAST_KEY],
        )
        .unwrap();

        let repo = SqliteSettingsRepository::new(conn);
        let err = repo.high_contrast_enabled().unwrap_err();
        assert!(err.to_string().contains("invalid boolean value"));
    }
}
