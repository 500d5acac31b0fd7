use std::time::Duration;

use anyhow::Result;
use ship_classes::LogSink;

use crate::config;

/// Scheduled trigger: every `every` seconds, run a pass when auto-sync is
/// enabled. Outcomes go to the log sink only; nothing is printed per pass.
///
/// Configuration is reloaded on every tick so toggling `auto_sync` takes
/// effect without restarting the loop.
pub async fn run(every: u64) -> Result<()> {
    println!("Scheduling sync every {every} seconds. Press Ctrl-C to stop.");

    let mut ticker = tokio::time::interval(Duration::from_secs(every.max(1)));

    loop {
        ticker.tick().await;

        let config = config::load_config();
        if !config.auto_sync {
            continue;
        }

        let (synchronizer, log) = crate::build_synchronizer(&config)?;
        log.info("Starting scheduled sync");

        let result = synchronizer.sync().await;

        if result.success {
            log.info(&format!(
                "Scheduled sync completed. Created: {}, Updated: {}, Errors: {}",
                result.created,
                result.updated,
                result.errors.len()
            ));
        } else {
            log.error(&format!("Scheduled sync failed: {}", result.message));
        }

        if config.shop_id.is_none()
            && let Some(shop_id) = result.shop_id
        {
            let _ = config::persist_shop_id(shop_id);
        }
    }
}
