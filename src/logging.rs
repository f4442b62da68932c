use std::fs::File;
use std::path::Path;

use anyhow::Context;
use env_logger::{Builder, Env, Target};

// The terminal is in raw mode drawing the grid, so logs go to a file.
// Default to `info`; override with RUST_LOG, e.g. `RUST_LOG=padgrid=trace`.
pub fn setup_logger(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .unwrap_or(()); // already initialised
    Ok(())
}
