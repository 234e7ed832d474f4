//! Configuration shared by the gafeed client library and CLI.

pub mod client_config;
pub mod config;
pub mod error;

pub use client_config::ClientConfig;
pub use config::{load_client_config, load_client_config_from_env};
pub use error::ConfigError;
