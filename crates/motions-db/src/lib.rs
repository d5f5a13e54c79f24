// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use motions_app::Entry;
use rusqlite::{Connection, params};
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "motions";
pub const DB_FILE_NAME: &str = "vim_cheatsheet.db";

/// Rows inserted the first time an empty `commands` table is seen. The
/// duplicated delete motions are part of the shipped sheet.
pub const SEED_ENTRIES: &[(&str, &str)] = &[
    ("Move cursor", "hjkl"),
    ("Go to top of page", "gg"),
    ("Go to bottom of page", "G"),
    ("Move to next word", "w/W"),
    ("Move to previous word", "b/B"),
    ("Move to end of word", "e/E"),
    ("Move to beginning of line", "0"),
    ("Move to end of line", "$"),
    ("Move to first non-whitespace character of line", "_"),
    ("Move to top of screen", "H"),
    ("Move to middle of screen", "M"),
    ("Move to bottom of screen", "L"),
    ("Move up half a page", "Ctrl+u"),
    ("Move down half a page", "Ctrl+d"),
    ("Move up a page", "Ctrl+b"),
    ("Move down a page", "Ctrl+f"),
    ("Move screen up one line", "Ctrl+e"),
    ("Move screen down one line", "Ctrl+y"),
    ("Replace char", "r"),
    ("Replace line", "R"),
    ("Insert before cursor", "i"),
    ("Insert at beginning of line", "I"),
    ("Append after cursor", "a"),
    ("Append at end of line", "A"),
    ("Insert new line below cursor", "o"),
    ("Insert new line above cursor", "O"),
    ("Delete char", "x"),
    ("Delete line", "dd"),
    ("Delete word", "dw"),
    ("Delete to end of line", "D"),
    ("Delete to end of word", "de"),
    ("Delete to beginning of line", "d0"),
    ("Delete to beginning of word", "db"),
    ("Change in word", "ciw"),
    ("Change in brackets", "ci{"),
    ("Change to end of line", "C"),
    ("Change line", "cc"),
    ("Indent line", ">>/<<"),
    ("Undo", "u"),
    ("Redo", "Ctrl+r"),
    ("Copy/yank", "y"),
    ("Copy/yank line", "yy"),
    ("Paste", "p"),
    ("Paste before cursor", "P"),
    ("Delete", "d"),
    ("Delete line", "dd"),
    ("Delete word", "dw"),
    ("Delete to end of line", "D"),
    ("Delete to end of word", "de"),
    ("Delete to beginning of line", "d0"),
    ("Delete to beginning of word", "db"),
    ("Visual line mode", "V"),
    ("Flip cursor in visual mode", "o"),
    ("Select similar words and replace", "*"),
    ("Search for word", "/word + n/N"),
    ("Search for word backwards", "?word + n/N"),
    ("Search for next word", "n"),
    ("Search for previous word", "N"),
];

pub fn seed_entries() -> Vec<Entry> {
    SEED_ENTRIES
        .iter()
        .map(|(title, description)| Entry::new(*title, *description))
        .collect()
}

/// The one long-lived handle onto the `commands` table.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let printable = path.to_string_lossy().to_string();
        validate_db_path(&printable)?;
        let conn = Connection::open(path)
            .with_context(|| format!("open database at {}", path.display()))?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory database")?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    pub fn raw_connection(&self) -> &Connection {
        &self.conn
    }

    /// Creates the table when missing and seeds it when it holds no rows.
    /// Running it against a populated table changes nothing.
    pub fn bootstrap(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "
                CREATE TABLE IF NOT EXISTS commands (
                  id INTEGER PRIMARY KEY AUTOINCREMENT,
                  title TEXT,
                  description TEXT
                );
                ",
            )
            .context("create commands table")?;

        if !table_exists(&self.conn, "commands")? {
            bail!("commands table is missing after creation");
        }

        let rows = self.entry_count()?;
        if rows > 0 {
            log::debug!("commands table already holds {rows} rows; skipping seed");
            return Ok(());
        }

        self.seed()
    }

    /// Inserts the whole seed set in one transaction; a failure leaves the
    /// table empty so the next bootstrap seeds again.
    pub fn seed(&self) -> Result<()> {
        let tx = self
            .conn
            .unchecked_transaction()
            .context("begin seed transaction")?;
        {
            let mut stmt = tx
                .prepare("INSERT INTO commands (title, description) VALUES (?, ?)")
                .context("prepare seed insert")?;
            for (title, description) in SEED_ENTRIES {
                stmt.execute(params![title, description])
                    .with_context(|| format!("seed entry {title:?}"))?;
            }
        }
        tx.commit().context("commit seed transaction")?;
        log::info!("seeded {} entries", SEED_ENTRIES.len());
        Ok(())
    }

    /// All rows in whatever order SQLite yields them.
    pub fn list_entries(&self) -> Result<Vec<Entry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT title, description FROM commands")
            .context("prepare entries query")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Entry {
                    title: row.get(0)?,
                    description: row.get(1)?,
                })
            })
            .context("query entries")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect entries")
    }

    pub fn add_entry(&self, entry: &Entry) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO commands (title, description) VALUES (?, ?)",
                params![entry.title, entry.description],
            )
            .with_context(|| format!("add entry {:?}", entry.title))?;
        Ok(())
    }

    /// Removes every row whose title matches exactly; returns the count.
    pub fn delete_entries_titled(&self, title: &str) -> Result<usize> {
        self.conn
            .execute("DELETE FROM commands WHERE title = ?", params![title])
            .with_context(|| format!("delete entries titled {title:?}"))
    }

    pub fn entry_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM commands", [], |row| row.get(0))
            .context("count entries")?;
        usize::try_from(count).context("entry count out of range")
    }

    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, error)| error)
            .context("close database")
    }
}

/// Where the database lives when the config names no path. Only resolves the
/// location; [`ensure_parent_dir`] creates the directory before opening.
pub fn default_db_path() -> Result<PathBuf> {
    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set [storage].db_path in the config file")
    })?;
    Ok(data_root.join(APP_NAME).join(DB_FILE_NAME))
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .with_context(|| format!("create data directory {}", parent.display())),
        _ => Ok(()),
    }
}

pub fn validate_db_path(path: &str) -> Result<()> {
    if path.is_empty() {
        bail!("database path must not be empty");
    }
    if path == ":memory:" {
        return Ok(());
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            bail!(
                "database path {path:?} looks like a URI ({scheme}://); pass a filesystem path instead"
            );
        }
    }

    if path.starts_with("file:") {
        bail!("database path {path:?} uses file: URI syntax; pass a plain filesystem path");
    }

    if path.contains('?') {
        bail!(
            "database path {path:?} contains '?'; remove query parameters and use a plain file path"
        );
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let exists = conn
        .query_row(
            "
            SELECT EXISTS(
              SELECT 1
              FROM sqlite_master
              WHERE type = 'table' AND name = ?
            )
            ",
            params![table],
            |row| row.get::<_, i64>(0),
        )
        .with_context(|| format!("check table existence for {table}"))?;
    Ok(exists == 1)
}

fn configure_connection(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        ",
    )
    .context("configure sqlite pragmas")
}

#[cfg(test)]
mod tests {
    use super::{SEED_ENTRIES, Store, seed_entries, table_exists};
    use anyhow::Result;

    #[test]
    fn seed_set_matches_entry_conversion() {
        let entries = seed_entries();
        assert_eq!(entries.len(), SEED_ENTRIES.len());
        assert_eq!(entries[0].title, "Move cursor");
        assert_eq!(entries[0].description, "hjkl");
    }

    #[test]
    fn bootstrap_creates_commands_table() -> Result<()> {
        let store = Store::open_memory()?;
        assert!(!table_exists(store.raw_connection(), "commands")?);
        store.bootstrap()?;
        assert!(table_exists(store.raw_connection(), "commands")?);
        Ok(())
    }

    #[test]
    fn close_releases_connection() -> Result<()> {
        let store = Store::open_memory()?;
        store.bootstrap()?;
        store.close()
    }
}
