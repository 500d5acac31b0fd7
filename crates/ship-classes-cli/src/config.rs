use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides the file-configured API token.
const TOKEN_ENV_VAR: &str = "PRINTIFY_API_TOKEN";

/// On-disk application configuration.
///
/// Loaded once per invocation and passed into component constructors; no
/// component reads configuration ambiently.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Printify API token. `PRINTIFY_API_TOKEN` wins over the file value.
    #[serde(default)]
    pub api_token: Option<String>,
    /// Sync target. Populated automatically after the first run selects one.
    #[serde(default)]
    pub shop_id: Option<u64>,
    /// Vendor response cache TTL in seconds.
    #[serde(default = "default_cache_expiration")]
    pub cache_expiration: u64,
    /// Whether the `schedule` loop actually runs syncs.
    #[serde(default)]
    pub auto_sync: bool,
    #[serde(default = "default_true")]
    pub enable_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            shop_id: None,
            cache_expiration: default_cache_expiration(),
            auto_sync: false,
            enable_logging: true,
        }
    }
}

fn default_cache_expiration() -> u64 {
    3600
}

fn default_true() -> bool {
    true
}

/// Config file path: `~/.config/ship-classes/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ship-classes").join("config.toml"))
}

fn load_file_config() -> AppConfig {
    if let Some(path) = config_path()
        && let Ok(contents) = std::fs::read_to_string(&path)
    {
        if let Ok(config) = toml::from_str::<AppConfig>(&contents) {
            return config;
        }
        eprintln!(
            "warning: failed to parse config at {}, using defaults",
            path.display()
        );
    }

    AppConfig::default()
}

/// Load config from file, letting the token environment variable win.
pub fn load_config() -> AppConfig {
    let mut config = load_file_config();

    if let Ok(token) = std::env::var(TOKEN_ENV_VAR)
        && !token.trim().is_empty()
    {
        config.api_token = Some(token);
    }

    config
}

/// Persist an auto-selected shop id for subsequent runs.
///
/// Rewrites the file from its own contents rather than the effective
/// config, so an environment-supplied token never lands on disk.
pub fn persist_shop_id(shop_id: u64) -> Result<()> {
    let path = config_path().context("could not determine config directory")?;

    let mut config = load_file_config();
    config.shop_id = Some(shop_id);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory: {}", parent.display()))?;
    }

    let contents = toml::to_string_pretty(&config).context("failed to serialize config")?;
    std::fs::write(&path, contents)
        .with_context(|| format!("failed to write config: {}", path.display()))?;

    Ok(())
}

/// Masked display form of a token: fully masked at 8 characters or fewer,
/// otherwise the first and last four characters with the middle filled.
pub fn masked_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();

    if chars.is_empty() {
        return String::new();
    }
    if chars.len() <= 8 {
        return "●".repeat(chars.len());
    }

    let head: String = chars.iter().take(4).collect();
    let tail: String = chars.iter().skip(chars.len() - 4).collect();
    format!("{head}{}{tail}", "●".repeat(chars.len() - 8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.api_token.is_none());
        assert!(config.shop_id.is_none());
        assert_eq!(config.cache_expiration, 3600);
        assert!(!config.auto_sync);
        assert!(config.enable_logging);
    }

    #[test]
    fn full_config_round_trips() {
        let toml_str = r#"
api_token = "pfy-abcdef"
shop_id = 42
cache_expiration = 600
auto_sync = true
enable_logging = false
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api_token.as_deref(), Some("pfy-abcdef"));
        assert_eq!(config.shop_id, Some(42));
        assert_eq!(config.cache_expiration, 600);
        assert!(config.auto_sync);
        assert!(!config.enable_logging);

        let rendered = toml::to_string_pretty(&config).unwrap();
        let reparsed: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(reparsed.shop_id, Some(42));
        assert_eq!(reparsed.api_token.as_deref(), Some("pfy-abcdef"));
    }

    #[test]
    fn masked_token_hides_the_middle() {
        assert_eq!(masked_token(""), "");
        assert_eq!(masked_token("short"), "●●●●●");
        assert_eq!(masked_token("12345678"), "●●●●●●●●");
        assert_eq!(
            masked_token("pfy-1234567890abcd"),
            format!("pfy-{}abcd", "●".repeat(10))
        );
    }

    #[test]
    fn masked_token_never_reveals_more_than_the_edges() {
        let token = "pfy-sensitive-middle-part-9999";
        let masked = masked_token(token);
        assert!(!masked.contains("sensitive"));
        assert!(masked.starts_with("pfy-"));
        assert!(masked.ends_with("9999"));
    }
}
