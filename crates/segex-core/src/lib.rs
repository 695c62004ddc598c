pub mod app_config;
pub mod campaign;
pub mod config;

pub use app_config::{AppConfig, FieldMap};
pub use campaign::{columns, CampaignRow, Channel, DATE_FORMAT, PUSH_SEGMENT_SUFFIX};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
