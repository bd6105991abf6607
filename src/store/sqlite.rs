//! SQLite layer of the durable bury store

use std::path::Path;

use rusqlite::{Connection, params};
use tracing::debug;

use crate::error::Result;
use crate::host::CardId;
use crate::store::migrations;

/// One bury record: a card and the time its burial expires, in seconds
/// since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuryRecord {
    pub card_id: CardId,
    pub until: i64,
}

/// Durable store of bury records, one SQLite file.
///
/// The store is the sole source of truth for "should this card still be
/// buried" across restarts; the host scheduler's in-memory bury state is
/// re-derived from it at reconcile time, never the other way around.
/// Single-process, single-writer.
pub struct BuryStore {
    conn: Connection,
    schema_version: u32,
}

impl std::fmt::Debug for BuryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuryStore")
            .field("schema_version", &self.schema_version)
            .finish_non_exhaustive()
    }
}

impl BuryStore {
    /// Open the store at the given path, creating file and schema if absent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Self::from_connection(Connection::open(path)?)
    }

    /// In-memory store, for tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        Self::configure_pragmas(&conn)?;
        let schema_version = migrations::run_migrations(&conn)?;

        Ok(Self {
            conn,
            schema_version,
        })
    }

    fn configure_pragmas(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;",
        )?;
        Ok(())
    }

    /// Current schema version after migrations.
    #[must_use]
    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    /// Insert or replace the record for one card (last-write-wins).
    pub fn upsert(&self, card_id: CardId, until: i64) -> Result<()> {
        self.conn.execute(
            "INSERT INTO buried (card_id, until) VALUES (?, ?)
             ON CONFLICT(card_id) DO UPDATE SET until = excluded.until",
            params![card_id, until],
        )?;
        Ok(())
    }

    /// Batched upsert inside a single transaction.
    ///
    /// All-or-nothing on commit; a crash mid-batch leaving nothing behind
    /// is acceptable, the next bury or reconcile pass recovers.
    pub fn upsert_many(&mut self, records: &[(CardId, i64)]) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO buried (card_id, until) VALUES (?, ?)
                 ON CONFLICT(card_id) DO UPDATE SET until = excluded.until",
            )?;
            for &(card_id, until) in records {
                stmt.execute(params![card_id, until])?;
            }
        }
        tx.commit()?;
        debug!(count = records.len(), "recorded burials");
        Ok(())
    }

    /// Card ids whose burial has not yet expired (strictly `until > now`).
    pub fn select_active(&self, now: i64) -> Result<Vec<CardId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT card_id FROM buried WHERE until > ? ORDER BY card_id")?;
        let rows = stmt.query_map([now], |row| row.get(0))?;
        let mut ids = Vec::new();
        for row in rows {
            ids.push(row?);
        }
        Ok(ids)
    }

    /// Delete rows whose burial has expired (`until <= now`).
    ///
    /// Best-effort housekeeping; returns the number of rows removed.
    pub fn delete_expired(&self, now: i64) -> Result<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM buried WHERE until <= ?", [now])?;
        if removed > 0 {
            debug!(removed, "swept expired bury records");
        }
        Ok(removed)
    }

    pub fn get(&self, card_id: CardId) -> Result<Option<BuryRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT card_id, until FROM buried WHERE card_id = ?")?;
        let mut rows = stmt.query([card_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(BuryRecord {
                card_id: row.get(0)?,
                until: row.get(1)?,
            }));
        }
        Ok(None)
    }

    /// All records, soonest expiry first.
    pub fn list_records(&self) -> Result<Vec<BuryRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT card_id, until FROM buried ORDER BY until, card_id")?;
        let rows = stmt.query_map([], |row| {
            Ok(BuryRecord {
                card_id: row.get(0)?,
                until: row.get(1)?,
            })
        })?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM buried", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    pub fn count_active(&self, now: i64) -> Result<u64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM buried WHERE until > ?", [now], |row| {
                    row.get(0)
                })?;
        Ok(count.max(0) as u64)
    }
}
