//! src/main.rs
//!
//! Entrypoint: installs error reporting, loads the configuration, opens the log
//! file and delegates to `app::run()`.

mod app;
mod chart;
mod config;
mod controller;
mod logging;
mod panels;
mod sensor;
mod session;
mod smoother;
mod timer;
mod ui;

#[cfg(test)]
mod integration_tests;

use std::path::PathBuf;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = config::resolve_config(path.as_deref())?;
    logging::init_logging(&config.log_file)?;

    app::run(config)
}
