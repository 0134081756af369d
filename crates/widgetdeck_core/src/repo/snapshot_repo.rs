//! Snapshot key-value slot contracts and implementations.
//!
//! # Responsibility
//! - Provide a stable read/write API over the durable `snapshots` slot.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Values stored under a key are opaque UTF-8 text; the repository never
//!   inspects or validates snapshot payloads.
//! - `save_snapshot` for an existing key overwrites the previous value.

use crate::db::{migrations, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key under which the dashboard snapshot is stored.
pub const SNAPSHOT_KEY: &str = "dashboardState";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for snapshot slot reads and writes.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    /// The backing store refused the operation (e.g. injected write
    /// failure in the in-memory fake, or quota-style conditions).
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::Unavailable(message) => write!(f, "snapshot store unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable key-value slot for serialized snapshots.
///
/// Implementations may be durable (SQLite) or ephemeral (in-memory fake);
/// the service layer is agnostic.
pub trait SnapshotRepository {
    /// Reads the value stored under `key`, if any.
    fn load_snapshot(&self, key: &str) -> RepoResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn save_snapshot(&self, key: &str, value: &str) -> RepoResult<()>;
}

/// SQLite-backed snapshot slot.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Wraps a connection after verifying it has been migrated.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = migrations::latest_version();
        let actual_version =
            conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let has_table: Option<String> = conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'snapshots';",
                [],
                |row| row.get(0),
            )
            .optional()?;
        if has_table.is_none() {
            return Err(RepoError::MissingRequiredTable("snapshots"));
        }

        Ok(Self { conn })
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load_snapshot(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM snapshots WHERE key = ?1;",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save_snapshot(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO snapshots (key, value)
             VALUES (?1, ?2)
             ON CONFLICT (key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-memory snapshot slot for tests and ephemeral sessions.
///
/// Supports injected write failures so the degraded-persistence path (keep
/// mutating in memory, log the failure) can be exercised without a real
/// storage fault.
#[derive(Debug, Default)]
pub struct MemorySnapshotRepository {
    slots: RefCell<BTreeMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl MemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `save_snapshot` fail until cleared.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Test hook: the raw stored value for `key`, bypassing the trait.
    pub fn raw_value(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }

    /// Test hook: stores a raw value, bypassing the trait.
    pub fn set_raw_value(&self, key: &str, value: &str) {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl SnapshotRepository for MemorySnapshotRepository {
    fn load_snapshot(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn save_snapshot(&self, key: &str, value: &str) -> RepoResult<()> {
        if self.fail_writes.get() {
            return Err(RepoError::Unavailable("write failure injected".to_string()));
        }
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
