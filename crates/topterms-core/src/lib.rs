pub mod app_config;
pub mod config;
pub mod report;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use report::{
    GroupKey, RankedProduct, ReportMeta, SearchTermRow, TermGroup, TOP_PRODUCT_SLOTS,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
