// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::config::Config;
use anyhow::{Context, Result};
use motions_app::Entry;
use motions_db::Store;
use std::path::Path;

/// Everything the app needs for one run: loaded config plus the single
/// open store. Built once at startup and closed on the way out.
pub struct AppContext {
    pub config: Config,
    pub store: Store,
}

impl AppContext {
    pub fn open(config: Config) -> Result<Self> {
        let db_path = config.db_path()?;
        Self::open_at(config, &db_path)
    }

    pub fn open_at(config: Config, db_path: &Path) -> Result<Self> {
        motions_db::ensure_parent_dir(db_path)?;
        let store = Store::open(db_path).with_context(|| {
            format!(
                "open database {} -- if this path is wrong, set [storage].db_path in the config file",
                db_path.display()
            )
        })?;
        store.bootstrap()?;
        log::info!(
            "opened database {} (log level {})",
            db_path.display(),
            config.log_level()
        );
        Ok(Self { config, store })
    }

    /// Log level the run was configured with.
    pub fn log_level(&self) -> simplelog::LevelFilter {
        self.config.log_level()
    }

    pub fn load_entries(&self) -> Result<Vec<Entry>> {
        let entries = self.store.list_entries()?;
        log::info!("loaded {} entries", entries.len());
        Ok(entries)
    }

    pub fn close(self) -> Result<()> {
        self.store.close()?;
        log::info!("database closed");
        Ok(())
    }
}
