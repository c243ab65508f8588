//! Persistence layer: the SQLite catalog backend.
//!
//! One table holds the whole catalog, keyed by the unique set name:
//!
//! * `sets(name, uuid, ctime, mtime, pattern, dependsOn)`
//!
//! `pattern` is the canonical re-serialized source of the assigned
//! expression and `dependsOn` a JSON array of the referenced names in visit
//! order. The schema is created idempotently when a backend is opened.
//!
//! Upserts go through `on conflict (name) do update` so that `uuid` and
//! `ctime` keep their first-insert values while `mtime`, `pattern` and
//! `dependsOn` are replaced.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::database::{Backend, BackendFactory, SetInfo};
use crate::error::{CantorError, Result};

const SCHEMA: &str = "
    create table if not exists sets (
        name text not null,
        uuid text not null,
        ctime text not null,
        mtime text not null,
        pattern text not null default '',
        dependsOn text not null,
        constraint unique_and_referenceable_name primary key (
            name
        ),
        constraint unique_uuid unique (
            uuid
        )
    ) STRICT;
";

/// Catalog backend storing named sets in a single SQLite database.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Opens (creating if needed) a file-backed catalog.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::prepare(Connection::open(path)?)
    }

    /// Opens a transient catalog that lives and dies with the connection.
    pub fn open_in_memory() -> Result<Self> {
        Self::prepare(Connection::open_in_memory()?)
    }

    fn prepare(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

/// Registry factory keeping one database file per database name under `dir`.
pub fn sqlite_factory(dir: impl Into<PathBuf>) -> BackendFactory {
    let dir = dir.into();
    Box::new(move |name: &str| {
        let path = dir.join(format!("{name}.db"));
        Ok(Box::new(SqliteBackend::open(path)?) as Box<dyn Backend>)
    })
}

// Raw row shape shared by list() and info().
type InfoRow = (String, String, DateTime<Utc>, DateTime<Utc>, String);

const INFO_COLUMNS: &str = "select name, uuid, ctime, mtime, dependsOn from sets";

fn info_row(row: &rusqlite::Row) -> rusqlite::Result<InfoRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

fn decode_info(row: InfoRow) -> Result<SetInfo> {
    let (name, uuid, ctime, mtime, depends_on) = row;
    let uuid = Uuid::parse_str(&uuid).map_err(|e| CantorError::Persistence(e.to_string()))?;
    let depends_on: Vec<String> =
        serde_json::from_str(&depends_on).map_err(|e| CantorError::Persistence(e.to_string()))?;
    Ok(SetInfo { name, uuid, ctime, mtime, depends_on })
}

impl Backend for SqliteBackend {
    fn list(&self) -> Result<Vec<SetInfo>> {
        let mut stmt = self.conn.prepare(INFO_COLUMNS)?;
        let rows = stmt.query_map([], info_row)?;
        let mut infos = Vec::new();
        for row in rows {
            infos.push(decode_info(row?)?);
        }
        Ok(infos)
    }

    fn info(&self, name: &str) -> Result<SetInfo> {
        let mut stmt = self.conn.prepare(&format!("{INFO_COLUMNS} where name = ?"))?;
        let row = stmt.query_row(params![name], info_row).optional()?;
        match row {
            Some(row) => decode_info(row),
            None => Err(CantorError::UnknownSet(name.to_string())),
        }
    }

    fn pattern(&self, name: &str) -> Result<String> {
        let mut stmt = self.conn.prepare("select pattern from sets where name = ?")?;
        let pattern = stmt
            .query_row(params![name], |row| row.get::<_, String>(0))
            .optional()?;
        pattern.ok_or_else(|| CantorError::UnknownSet(name.to_string()))
    }

    fn persist(&mut self, name: &str, pattern: &str, depends_on: &[String]) -> Result<()> {
        let depends_on =
            serde_json::to_string(depends_on).map_err(|e| CantorError::Persistence(e.to_string()))?;
        let now = Utc::now();
        self.conn
            .prepare(
                "insert into sets (name, uuid, ctime, mtime, pattern, dependsOn)
                 values (?, ?, ?, ?, ?, ?)
                 on conflict (name) do update set
                     mtime = excluded.mtime,
                     pattern = excluded.pattern,
                     dependsOn = excluded.dependsOn",
            )?
            .execute(params![name, Uuid::new_v4().to_string(), now, now, pattern, depends_on])?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        // the connection is closed when the backend drops; nothing pending
        Ok(())
    }
}
