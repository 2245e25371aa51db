use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_MOBILE_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 6.0; Nexus 5 Build/MRA58N) AppleWebKit/537.36 (KHTML, like Gecko) Chrome Mobile Safari/537.36";
pub const DEFAULT_OPPO_GATEWAY_URL: &str = "https://opsg-gateway-in.oppo.com";
pub const DEFAULT_CROMA_INVENTORY_URL: &str =
    "https://api.croma.com/inventory/oms/v2/tms/details-pwa/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so an empty environment yields a usable
/// config. Tests drive this with a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("PRICETRACK_ENV", "development"))?;
    let log_level = or_default("PRICETRACK_LOG_LEVEL", "info");
    let store_path = PathBuf::from(or_default("PRICETRACK_STORE_PATH", "./data/products.json"));

    let scraper_request_timeout_secs = parse_u64("PRICETRACK_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    if scraper_request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PRICETRACK_SCRAPER_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let scraper_user_agent = or_default("PRICETRACK_SCRAPER_USER_AGENT", DEFAULT_MOBILE_USER_AGENT);

    let oppo_gateway_url = or_default("PRICETRACK_OPPO_GATEWAY_URL", DEFAULT_OPPO_GATEWAY_URL);
    let croma_inventory_url =
        or_default("PRICETRACK_CROMA_INVENTORY_URL", DEFAULT_CROMA_INVENTORY_URL);
    let croma_subscription_key = optional("CROMA_SUBSCRIPTION_KEY");

    let pincodes = split_list(&or_default("PRICETRACK_PINCODES", "132001"));
    if pincodes.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "PRICETRACK_PINCODES".to_string(),
            reason: "at least one pincode is required".to_string(),
        });
    }
    if let Some(bad) = pincodes
        .iter()
        .find(|p| !p.chars().all(|c| c.is_ascii_digit()))
    {
        return Err(ConfigError::InvalidEnvVar {
            var: "PRICETRACK_PINCODES".to_string(),
            reason: format!("pincode \"{bad}\" is not numeric"),
        });
    }

    let telegram_bot_token = optional("TELEGRAM_BOT_TOKEN");
    let telegram_chat_ids = split_list(&or_default("TELEGRAM_CHAT_IDS", ""));

    Ok(AppConfig {
        env,
        log_level,
        store_path,
        scraper_request_timeout_secs,
        scraper_user_agent,
        oppo_gateway_url,
        croma_inventory_url,
        croma_subscription_key,
        pincodes,
        telegram_bot_token,
        telegram_chat_ids,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PRICETRACK_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

/// Splits a comma-separated list, dropping blank entries.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
