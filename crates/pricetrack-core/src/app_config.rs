use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub store_path: PathBuf,
    pub scraper_request_timeout_secs: u64,
    /// Sent when fetching storefront HTML; Reliance Digital only serves the
    /// specifications block to mobile browsers.
    pub scraper_user_agent: String,
    pub oppo_gateway_url: String,
    pub croma_inventory_url: String,
    pub croma_subscription_key: Option<String>,
    /// Pincodes tried in order for Croma availability.
    pub pincodes: Vec<String>,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_ids: Vec<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("store_path", &self.store_path)
            .field(
                "scraper_request_timeout_secs",
                &self.scraper_request_timeout_secs,
            )
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field("oppo_gateway_url", &self.oppo_gateway_url)
            .field("croma_inventory_url", &self.croma_inventory_url)
            .field(
                "croma_subscription_key",
                &self.croma_subscription_key.as_ref().map(|_| "[redacted]"),
            )
            .field("pincodes", &self.pincodes)
            .field(
                "telegram_bot_token",
                &self.telegram_bot_token.as_ref().map(|_| "[redacted]"),
            )
            .field("telegram_chat_ids", &self.telegram_chat_ids.len())
            .finish()
    }
}
