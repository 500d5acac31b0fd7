use anyhow::Result;

use crate::config::{AppConfig, masked_token};

/// Display the effective configuration. The token is only ever shown in
/// its masked form.
pub fn run(config: &AppConfig) -> Result<()> {
    let token = match config.api_token.as_deref() {
        Some(token) => masked_token(token),
        None => "(not set)".to_owned(),
    };
    let shop = match config.shop_id {
        Some(id) => id.to_string(),
        None => "(auto-select on first sync)".to_owned(),
    };

    println!("api_token:        {token}");
    println!("shop_id:          {shop}");
    println!("cache_expiration: {}s", config.cache_expiration);
    println!("auto_sync:        {}", if config.auto_sync { "yes" } else { "no" });
    println!(
        "enable_logging:   {}",
        if config.enable_logging { "yes" } else { "no" }
    );

    Ok(())
}
