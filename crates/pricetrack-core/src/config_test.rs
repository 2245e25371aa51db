use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_is_rejected() {
    let result = parse_environment("staging");
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PRICETRACK_ENV"),
        "expected InvalidEnvVar(PRICETRACK_ENV), got: {result:?}"
    );
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.store_path.to_str(), Some("./data/products.json"));
    assert_eq!(cfg.scraper_request_timeout_secs, 30);
    assert_eq!(cfg.scraper_user_agent, DEFAULT_MOBILE_USER_AGENT);
    assert_eq!(cfg.oppo_gateway_url, DEFAULT_OPPO_GATEWAY_URL);
    assert_eq!(cfg.croma_inventory_url, DEFAULT_CROMA_INVENTORY_URL);
    assert!(cfg.croma_subscription_key.is_none());
    assert_eq!(cfg.pincodes, vec!["132001".to_string()]);
    assert!(cfg.telegram_bot_token.is_none());
    assert!(cfg.telegram_chat_ids.is_empty());
}

#[test]
fn build_app_config_fails_with_invalid_timeout() {
    let mut map = HashMap::new();
    map.insert("PRICETRACK_SCRAPER_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PRICETRACK_SCRAPER_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(PRICETRACK_SCRAPER_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_timeout() {
    let mut map = HashMap::new();
    map.insert("PRICETRACK_SCRAPER_REQUEST_TIMEOUT_SECS", "0");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn build_app_config_splits_pincodes_and_chat_ids() {
    let mut map = HashMap::new();
    map.insert("PRICETRACK_PINCODES", "132001, 110001,");
    map.insert("TELEGRAM_CHAT_IDS", " 111 ,222,, 333");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.pincodes, vec!["132001", "110001"]);
    assert_eq!(cfg.telegram_chat_ids, vec!["111", "222", "333"]);
}

#[test]
fn build_app_config_rejects_non_numeric_pincode() {
    let mut map = HashMap::new();
    map.insert("PRICETRACK_PINCODES", "132001,abc");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PRICETRACK_PINCODES"),
        "expected InvalidEnvVar(PRICETRACK_PINCODES), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_blank_pincode_list() {
    let mut map = HashMap::new();
    map.insert("PRICETRACK_PINCODES", " , ");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn blank_secrets_are_treated_as_absent() {
    let mut map = HashMap::new();
    map.insert("CROMA_SUBSCRIPTION_KEY", "   ");
    map.insert("TELEGRAM_BOT_TOKEN", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.croma_subscription_key.is_none());
    assert!(cfg.telegram_bot_token.is_none());
}

#[test]
fn debug_output_redacts_secrets() {
    let mut map = HashMap::new();
    map.insert("CROMA_SUBSCRIPTION_KEY", "super-secret-key");
    map.insert("TELEGRAM_BOT_TOKEN", "123:abc");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("super-secret-key"));
    assert!(!debug.contains("123:abc"));
    assert!(debug.contains("[redacted]"));
}
