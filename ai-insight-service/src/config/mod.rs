pub mod default_config;
pub mod insight_config;
