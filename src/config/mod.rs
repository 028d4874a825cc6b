//! Component configuration subsystem.
//!
//! # Data Flow
//! ```text
//! service.json
//!     → loader.rs (split into sections, route each sub-object by key)
//!     → <component>.load_json (decode, defaults, parse fields)
//!     → validation.rs (semantic checks)
//!     → component config (validated, read-only)
//!
//! On reload:
//!     watcher.rs detects change
//!     → loader.rs loads new document
//!     → atomic swap of Arc<ConfigManager> in SharedConfig
//! ```
//!
//! # Design Decisions
//! - Every component config follows the same lifecycle (see [`ComponentConfig`])
//! - External field names are snake_case strings, fixed per component
//! - Validation reports the first violation only
//! - Empty or absent fields keep their default value

pub mod addr;
pub mod duration;
pub mod error;
pub mod ipfsproxy;
pub mod loader;
pub mod numpin;
pub mod registry;
pub mod validation;
pub mod watcher;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use duration::SignedDuration;
pub use error::ConfigError;
pub use ipfsproxy::ProxyConfig;
pub use loader::{load_config, ConfigManager};
pub use numpin::InformerConfig;
pub use registry::{AnyComponentConfig, ComponentKind, Section};
pub use watcher::{ConfigWatcher, SharedConfig};

/// Lifecycle shared by every component configuration.
///
/// A config starts empty, is filled by [`apply_defaults`](Self::apply_defaults)
/// or [`load_json`](Self::load_json), and is ready for use once
/// [`validate`](Self::validate) succeeds.
pub trait ComponentConfig {
    /// Key of the component's section in the aggregated document.
    fn config_key(&self) -> &'static str;

    /// Overwrite every field with its built-in default.
    fn apply_defaults(&mut self) -> Result<(), ConfigError>;

    /// Check the current values, returning the first violation found.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Load from the JSON form produced by [`to_json`](Self::to_json).
    ///
    /// Defaults are applied first, so absent or empty fields keep their
    /// default value. On a field error the config is left partly loaded.
    fn load_json(&mut self, raw: &[u8]) -> Result<(), ConfigError>;

    /// Render to indented JSON.
    fn to_json(&self) -> Result<Vec<u8>, ConfigError>;
}

pub(crate) fn decode_json<T: DeserializeOwned>(
    component: &'static str,
    raw: &[u8],
) -> Result<T, ConfigError> {
    serde_json::from_slice(raw).map_err(|source| {
        tracing::error!(component, error = %source, "Error unmarshaling config");
        ConfigError::Decode { component, source }
    })
}

pub(crate) fn encode_json<T: Serialize>(
    component: &'static str,
    value: &T,
) -> Result<Vec<u8>, ConfigError> {
    serde_json::to_vec_pretty(value).map_err(|source| ConfigError::Serialize { component, source })
}
