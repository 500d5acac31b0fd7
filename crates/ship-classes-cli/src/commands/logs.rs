use std::path::Path;

use anyhow::{Context, Result};

use crate::logger;

/// Show the newest entries from today's log file.
pub fn run(dir: &Path, limit: usize) -> Result<()> {
    let lines = logger::tail_log(dir, limit).context("failed to read log file")?;

    if lines.is_empty() {
        println!("No log entries for today.");
        return Ok(());
    }

    for line in lines {
        println!("{line}");
    }

    Ok(())
}
