// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use motions_app::Entry;
use motions_db::Store;

pub struct DbRuntime<'a> {
    store: &'a Store,
}

impl<'a> DbRuntime<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }
}

impl motions_tui::AppRuntime for DbRuntime<'_> {
    fn add_entry(&mut self, entry: &Entry) -> Result<()> {
        self.store.add_entry(entry)?;
        log::info!("added {:?} ({:?})", entry.title, entry.description);
        Ok(())
    }

    fn delete_entries_titled(&mut self, title: &str) -> Result<usize> {
        let removed = self.store.delete_entries_titled(title)?;
        log::info!("deleted {removed} entries titled {title:?}");
        Ok(removed)
    }
}
