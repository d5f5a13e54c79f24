// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod context;
mod logging;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use context::AppContext;
use motions_app::AppState;
use runtime::DbRuntime;

fn main() {
    if let Err(error) = run() {
        log::error!("{error:#}");
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config_path = Config::default_path()?;
    let config = Config::load(&config_path)
        .with_context(|| format!("load config {}", config_path.display()))?;

    let log_path = config.log_path()?;
    logging::init(config.log_level(), &log_path)?;
    log::info!(
        "motions {} starting (config {})",
        env!("CARGO_PKG_VERSION"),
        config_path.display()
    );

    let context = AppContext::open(config)?;
    log::debug!("running at log level {}", context.log_level());
    let mut state = AppState::new(context.load_entries()?);

    let mut runtime = DbRuntime::new(&context.store);
    motions_tui::run_app(&mut state, &mut runtime)?;

    context.close()?;
    log::info!("motions exiting");
    Ok(())
}
