use anyhow::Result;
use ship_classes::SyncResult;

use crate::config::{self, AppConfig};

/// Print a run outcome: status line to stdout, per-item errors to stderr.
pub fn print_result(result: &SyncResult) {
    println!("{}", result.message);
    if result.success {
        for error in &result.errors {
            eprintln!("warning: {error}");
        }
    }
}

/// Manual trigger: run one pass and report the outcome on the terminal.
pub async fn run(config: &AppConfig) -> Result<()> {
    let (synchronizer, _log) = crate::build_synchronizer(config)?;

    let result = synchronizer.sync().await;
    print_result(&result);

    // remember an auto-selected shop for the next run
    if config.shop_id.is_none()
        && let Some(shop_id) = result.shop_id
    {
        config::persist_shop_id(shop_id)?;
    }

    if !result.success {
        anyhow::bail!("sync failed");
    }

    Ok(())
}
