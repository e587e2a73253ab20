//! src/logging.rs
//!
//! File-backed logger. The terminal belongs to the UI, so log records go to a
//! file instead of stderr. Level filtering follows `RUST_LOG` (default `info`).

use std::fs::OpenOptions;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use env_logger::{Builder, Env, Target};

pub fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("Failed to open log file {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .wrap_err("Logger already initialized")
}
