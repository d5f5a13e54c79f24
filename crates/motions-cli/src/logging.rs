// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::{self, File, OpenOptions};
use std::path::Path;

/// Routes the `log` facade to a file. The terminal belongs to the TUI, so
/// nothing is ever written to stdout or stderr from here.
pub fn init(level: LevelFilter, path: &Path) -> Result<()> {
    if level == LevelFilter::Off {
        return Ok(());
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }

    let file = open_log_file(path)?;
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    WriteLogger::init(level, log_config, file)
        .with_context(|| format!("install logger for {}", path.display()))
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))
}
