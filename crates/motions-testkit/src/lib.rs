// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use motions_app::Entry;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch directory holding a database file path that does not exist yet.
/// The directory is removed when the value drops.
pub struct TempDb {
    _dir: TempDir,
    path: PathBuf,
}

impl TempDb {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp dir")?;
        let path = dir.path().join("motions-test.db");
        Ok(Self { _dir: dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a second, independent connection for checking what actually
    /// reached disk.
    pub fn inspect(&self) -> Result<Connection> {
        Connection::open(&self.path)
            .with_context(|| format!("open {} for inspection", self.path.display()))
    }
}

pub fn row_count(conn: &Connection) -> Result<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM commands", [], |row| row.get(0))
        .context("count commands rows")?;
    usize::try_from(count).context("row count out of range")
}

pub fn rows_titled(conn: &Connection, title: &str) -> Result<Vec<Entry>> {
    let mut stmt = conn
        .prepare("SELECT title, description FROM commands WHERE title = ? ORDER BY id ASC")
        .context("prepare titled rows query")?;
    let rows = stmt
        .query_map([title], |row| {
            Ok(Entry {
                title: row.get(0)?,
                description: row.get(1)?,
            })
        })
        .context("query titled rows")?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .context("collect titled rows")
}

/// Creates the `commands` table by hand with the given rows, bypassing the
/// store so tests can start from arbitrary on-disk state.
pub fn write_rows(conn: &Connection, entries: &[Entry]) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS commands (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          title TEXT,
          description TEXT
        );
        ",
    )
    .context("create commands table")?;
    for entry in entries {
        conn.execute(
            "INSERT INTO commands (title, description) VALUES (?, ?)",
            [&entry.title, &entry.description],
        )
        .with_context(|| format!("insert fixture {:?}", entry.title))?;
    }
    Ok(())
}

pub fn fixture_entries() -> Vec<Entry> {
    vec![
        Entry::new("Move cursor", "hjkl"),
        Entry::new("Go to top of page", "gg"),
        Entry::new("Delete line", "dd"),
        Entry::new("Undo", "u"),
        Entry::new("Delete line", "dd"),
        Entry::new("Search for word", "/word + n/N"),
    ]
}

#[cfg(test)]
mod tests {
    use super::{TempDb, fixture_entries, row_count, rows_titled, write_rows};
    use anyhow::Result;

    #[test]
    fn write_rows_round_trips_through_inspection() -> Result<()> {
        let db = TempDb::new()?;
        let conn = db.inspect()?;
        write_rows(&conn, &fixture_entries())?;

        assert_eq!(row_count(&conn)?, 6);
        assert_eq!(rows_titled(&conn, "Delete line")?.len(), 2);
        Ok(())
    }
}
