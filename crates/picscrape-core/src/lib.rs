pub mod app_config;
pub mod config;
pub mod records;
pub mod site;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use records::{CategoryRef, PointsTier, ProductLink, ProductPriceRecord, ProductRecord};
pub use site::{Site, SiteConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("unsupported website \"{0}\"")]
    UnsupportedSite(String),
}
