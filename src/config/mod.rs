// ==========================================
// Abrazaderas - configuration layer
// ==========================================
// QuoterConfig: commercial tables (serde JSON)
// ConfigManager: file location + loading
// ==========================================

pub mod config_manager;
pub mod quoter_config;

pub use config_manager::{ConfigError, ConfigManager, CONFIG_PATH_ENV};
pub use quoter_config::{DiameterMapping, DiameterWeight, PriceList, QuoterConfig};
