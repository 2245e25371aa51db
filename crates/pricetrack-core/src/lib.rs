pub mod app_config;
pub mod config;
pub mod hint;
pub mod products;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use hint::{extract_apple_part_number, store_hint, StoreHint};
pub use products::{
    NewProduct, OppoVariant, ParseStoreTypeError, Product, ProductSource, StoreType,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
