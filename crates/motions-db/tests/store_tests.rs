// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use motions_app::Entry;
use motions_db::{
    DB_FILE_NAME, SEED_ENTRIES, Store, default_db_path, ensure_parent_dir, seed_entries,
    validate_db_path,
};
use std::path::Path;
use motions_testkit::{TempDb, fixture_entries, row_count, rows_titled, write_rows};
use pretty_assertions::assert_eq;

#[test]
fn validate_db_path_rejects_uri_forms() {
    assert!(validate_db_path("").is_err());
    assert!(validate_db_path("file:test.db").is_err());
    assert!(validate_db_path("https://example.com/db.sqlite").is_err());
    assert!(validate_db_path("db.sqlite?mode=ro").is_err());
    assert!(validate_db_path(":memory:").is_ok());
    assert!(validate_db_path("/tmp/vim_cheatsheet.db").is_ok());
}

#[test]
fn default_db_path_names_the_cheatsheet_file() -> Result<()> {
    let path = default_db_path()?;
    assert!(path.ends_with(Path::new("motions").join(DB_FILE_NAME)));
    Ok(())
}

#[test]
fn ensure_parent_dir_creates_missing_directories() -> Result<()> {
    let db = TempDb::new()?;
    let nested = db.path().with_file_name("nested/dir/cheats.db");
    ensure_parent_dir(&nested)?;
    assert!(nested.parent().is_some_and(Path::is_dir));

    let store = Store::open(&nested)?;
    store.bootstrap()?;
    assert_eq!(store.entry_count()?, SEED_ENTRIES.len());
    ensure_parent_dir(Path::new(":memory:"))?;
    Ok(())
}

#[test]
fn bootstrap_seeds_empty_table_with_fixed_set() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    let entries = store.list_entries()?;
    assert_eq!(entries, seed_entries());
    assert_eq!(entries.len(), SEED_ENTRIES.len());
    assert!(entries.contains(&Entry::new("Move cursor", "hjkl")));
    Ok(())
}

#[test]
fn bootstrap_is_idempotent() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    let before = store.entry_count()?;

    store.bootstrap()?;
    assert_eq!(store.entry_count()?, before);
    Ok(())
}

#[test]
fn bootstrap_leaves_populated_table_alone() -> Result<()> {
    let db = TempDb::new()?;
    write_rows(&db.inspect()?, &fixture_entries())?;

    let store = Store::open(db.path())?;
    store.bootstrap()?;
    assert_eq!(store.list_entries()?, fixture_entries());
    Ok(())
}

#[test]
fn failed_seed_is_rolled_back_and_retried() -> Result<()> {
    let store = Store::open_memory()?;
    store.raw_connection().execute_batch(
        "
        CREATE TABLE commands (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          title TEXT,
          description TEXT
        );
        CREATE TRIGGER fail_on_undo BEFORE INSERT ON commands
        WHEN NEW.title = 'Undo'
        BEGIN
          SELECT RAISE(ABORT, 'simulated disk failure');
        END;
        ",
    )?;

    let error = store.bootstrap().expect_err("seed should abort at Undo");
    assert!(format!("{error:#}").contains("simulated disk failure"));
    assert_eq!(store.entry_count()?, 0);

    store
        .raw_connection()
        .execute_batch("DROP TRIGGER fail_on_undo;")?;
    store.bootstrap()?;
    assert_eq!(store.entry_count()?, SEED_ENTRIES.len());
    assert_eq!(store.list_entries()?, seed_entries());
    Ok(())
}

#[test]
fn seed_contains_duplicate_titles() {
    let delete_lines = SEED_ENTRIES
        .iter()
        .filter(|(title, description)| *title == "Delete line" && *description == "dd")
        .count();
    assert_eq!(delete_lines, 2);
}

#[test]
fn add_entry_appends_row() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    let entry = Entry::new("Jump to mark", "`m");
    store.add_entry(&entry)?;

    let entries = store.list_entries()?;
    assert_eq!(entries.len(), SEED_ENTRIES.len() + 1);
    assert_eq!(entries.last(), Some(&entry));
    let matches = entries
        .iter()
        .filter(|candidate| candidate.title == entry.title)
        .collect::<Vec<_>>();
    assert_eq!(matches, vec![&entry]);
    Ok(())
}

#[test]
fn add_entry_does_not_validate_fields() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;
    store.add_entry(&Entry::new("", ""))?;
    assert_eq!(store.entry_count()?, SEED_ENTRIES.len() + 1);
    Ok(())
}

#[test]
fn delete_removes_every_row_with_title() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    let removed = store.delete_entries_titled("Delete line")?;
    assert_eq!(removed, 2);
    assert_eq!(store.entry_count()?, SEED_ENTRIES.len() - 2);
    assert!(
        store
            .list_entries()?
            .iter()
            .all(|entry| entry.title != "Delete line")
    );
    Ok(())
}

#[test]
fn delete_matches_title_exactly() -> Result<()> {
    let store = Store::open_memory()?;
    store.bootstrap()?;

    assert_eq!(store.delete_entries_titled("delete line")?, 0);
    assert_eq!(store.delete_entries_titled("Delete")?, 1);
    assert_eq!(store.entry_count()?, SEED_ENTRIES.len() - 1);
    Ok(())
}

#[test]
fn writes_reach_disk() -> Result<()> {
    let db = TempDb::new()?;
    let store = Store::open(db.path())?;
    store.bootstrap()?;
    store.add_entry(&Entry::new("Jump to mark", "`m"))?;
    store.delete_entries_titled("Undo")?;
    store.close()?;

    let conn = db.inspect()?;
    assert_eq!(row_count(&conn)?, SEED_ENTRIES.len());
    assert_eq!(
        rows_titled(&conn, "Jump to mark")?,
        vec![Entry::new("Jump to mark", "`m")]
    );
    assert!(rows_titled(&conn, "Undo")?.is_empty());
    Ok(())
}

#[test]
fn reopening_keeps_rows_without_reseeding() -> Result<()> {
    let db = TempDb::new()?;
    {
        let store = Store::open(db.path())?;
        store.bootstrap()?;
        store.delete_entries_titled("Move cursor")?;
        store.close()?;
    }

    let store = Store::open(db.path())?;
    store.bootstrap()?;
    assert_eq!(store.entry_count()?, SEED_ENTRIES.len() - 1);
    Ok(())
}

#[test]
fn queries_fail_without_table() -> Result<()> {
    let store = Store::open_memory()?;
    let error = store
        .list_entries()
        .expect_err("missing table should fail");
    assert!(error.to_string().contains("prepare entries query"));
    assert!(store.add_entry(&Entry::new("a", "b")).is_err());
    assert!(store.delete_entries_titled("a").is_err());
    Ok(())
}
