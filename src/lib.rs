//! Component configuration for cluster services.
//!
//! Each pluggable component owns a config object with the same lifecycle:
//! defaults, validation, loading from JSON and rendering back to JSON.
//! See [`config::ComponentConfig`].

pub mod config;
pub mod observability;

pub use config::{ComponentConfig, ConfigError, ConfigManager, InformerConfig, ProxyConfig};
