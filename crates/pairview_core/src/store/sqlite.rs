//! SQLite-backed snapshot and blob store.
//!
//! # Responsibility
//! - Hold the snapshot as one JSON document in a key-value table.
//! - Hold imported image bytes in a blob table keyed by handle key.
//!
//! # Invariants
//! - No schema versioning: the persisted document is the bare snapshot
//!   record and the normalizer is the sole defense against drift.
//! - A corrupt or unreadable document loads as `None`, never as an error.

use crate::model::snapshot::{RawSnapshot, Snapshot};
use crate::store::{BlobStore, SnapshotStore, StoreResult};
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

const SNAPSHOT_KEY: &str = "snapshot";

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS snapshots (
    key   TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS blobs (
    handle_key TEXT PRIMARY KEY NOT NULL,
    bytes      BLOB NOT NULL
);
";

/// Snapshot and binary content store over a local SQLite database.
pub struct SqliteSnapshotStore {
    conn: Connection,
}

impl SqliteSnapshotStore {
    /// Opens a database file and bootstraps the schema.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let started_at = Instant::now();
        info!("event=store_open module=store status=start mode=file");
        let conn = Connection::open(path)?;
        Self::bootstrap(conn, started_at, "file")
    }

    /// Opens an in-memory database, used by tests and throwaway sessions.
    pub fn open_in_memory() -> StoreResult<Self> {
        let started_at = Instant::now();
        info!("event=store_open module=store status=start mode=memory");
        let conn = Connection::open_in_memory()?;
        Self::bootstrap(conn, started_at, "memory")
    }

    fn bootstrap(conn: Connection, started_at: Instant, mode: &str) -> StoreResult<Self> {
        conn.busy_timeout(Duration::from_secs(5))?;
        match conn.execute_batch(SCHEMA_SQL) {
            Ok(()) => {
                info!(
                    "event=store_open module=store status=ok mode={mode} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(Self { conn })
            }
            Err(err) => {
                warn!(
                    "event=store_open module=store status=error mode={mode} duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err.into())
            }
        }
    }

    fn load_document(&self) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM snapshots WHERE key = ?1;",
                [SNAPSHOT_KEY],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    fn load(&self) -> Option<RawSnapshot> {
        let document = match self.load_document() {
            Ok(Some(document)) => document,
            Ok(None) => return None,
            Err(err) => {
                warn!("event=snapshot_load module=store status=error error={err}");
                return None;
            }
        };
        match serde_json::from_str(&document) {
            Ok(raw) => Some(raw),
            Err(err) => {
                // Treated as no prior state; the caller synthesizes a
                // default snapshot.
                warn!("event=snapshot_load module=store status=discarded error={err}");
                None
            }
        }
    }

    fn save(&self, snapshot: &Snapshot) {
        let document = match serde_json::to_string(snapshot) {
            Ok(document) => document,
            Err(err) => {
                warn!("event=snapshot_save module=store status=error error={err}");
                return;
            }
        };
        let written = self.conn.execute(
            "INSERT INTO snapshots (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![SNAPSHOT_KEY, document],
        );
        if let Err(err) = written {
            warn!("event=snapshot_save module=store status=error error={err}");
        }
    }
}

impl BlobStore for SqliteSnapshotStore {
    fn put_blob(&self, handle_key: &str, bytes: &[u8]) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO blobs (handle_key, bytes) VALUES (?1, ?2)
             ON CONFLICT(handle_key) DO UPDATE SET bytes = excluded.bytes;",
            params![handle_key, bytes],
        )?;
        Ok(())
    }

    fn get_blob(&self, handle_key: &str) -> StoreResult<Option<Vec<u8>>> {
        let bytes = self
            .conn
            .query_row(
                "SELECT bytes FROM blobs WHERE handle_key = ?1;",
                [handle_key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(bytes)
    }
}
