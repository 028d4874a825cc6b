//! Loading and saving the aggregated configuration document.
//!
//! The document groups component configs by section and key:
//!
//! ```json
//! {
//!   "api": { "ipfsproxy": { "node_multiaddress": "/ip4/127.0.0.1/tcp/5001" } },
//!   "informer": { "numpin": { "metric_ttl": "10s" } }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::config::error::ConfigError;
use crate::config::ipfsproxy::ProxyConfig;
use crate::config::numpin::InformerConfig;
use crate::config::registry::{AnyComponentConfig, ComponentKind};
use crate::config::{decode_json, encode_json, ComponentConfig};

/// Name used for errors about the document as a whole.
const DOCUMENT: &str = "service";

/// Holds the configs of the registered components.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigManager {
    components: BTreeMap<ComponentKind, AnyComponentConfig>,
}

impl ConfigManager {
    /// A manager with no components registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// A manager with an empty config for each of the given components.
    pub fn with_components(kinds: impl IntoIterator<Item = ComponentKind>) -> Self {
        let mut manager = Self::new();
        for kind in kinds {
            manager.register(kind.new_config());
        }
        manager
    }

    /// A manager with every known component registered.
    pub fn with_all_components() -> Self {
        Self::with_components(ComponentKind::ALL)
    }

    /// Register a config, replacing and returning any previous one of the same kind.
    pub fn register(&mut self, cfg: impl Into<AnyComponentConfig>) -> Option<AnyComponentConfig> {
        let cfg = cfg.into();
        self.components.insert(cfg.kind(), cfg)
    }

    pub fn get(&self, kind: ComponentKind) -> Option<&AnyComponentConfig> {
        self.components.get(&kind)
    }

    pub fn get_mut(&mut self, kind: ComponentKind) -> Option<&mut AnyComponentConfig> {
        self.components.get_mut(&kind)
    }

    pub fn proxy(&self) -> Option<&ProxyConfig> {
        match self.get(ComponentKind::IpfsProxy) {
            Some(AnyComponentConfig::IpfsProxy(cfg)) => Some(cfg),
            _ => None,
        }
    }

    pub fn informer(&self) -> Option<&InformerConfig> {
        match self.get(ComponentKind::NumPin) {
            Some(AnyComponentConfig::NumPin(cfg)) => Some(cfg),
            _ => None,
        }
    }

    pub fn components(&self) -> impl Iterator<Item = &AnyComponentConfig> {
        self.components.values()
    }

    pub fn apply_defaults(&mut self) -> Result<(), ConfigError> {
        for cfg in self.components.values_mut() {
            cfg.apply_defaults()?;
        }
        Ok(())
    }

    /// Validate every component, returning the first error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.components.values().try_for_each(|cfg| cfg.validate())
    }

    /// Load every registered component from an aggregated document.
    ///
    /// Components without a sub-object in the document get their defaults.
    pub fn load_json(&mut self, raw: &[u8]) -> Result<(), ConfigError> {
        let doc: Map<String, Value> = decode_json(DOCUMENT, raw)?;

        let mut sections = BTreeMap::new();
        for (name, value) in &doc {
            if !ComponentKind::ALL.iter().any(|kind| kind.section().as_str() == name.as_str()) {
                tracing::debug!(section = %name, "Ignoring unknown section");
                continue;
            }
            let section: Map<String, Value> = serde_json::from_value(value.clone())
                .map_err(|source| ConfigError::Decode {
                    component: DOCUMENT,
                    source,
                })?;
            for key in section.keys() {
                if ComponentKind::from_key(key).map(|kind| kind.section().as_str()) != Some(name.as_str()) {
                    tracing::debug!(section = %name, key = %key, "Ignoring unknown component");
                }
            }
            sections.insert(name.as_str(), section);
        }

        for (kind, cfg) in self.components.iter_mut() {
            let sub = sections
                .get(kind.section().as_str())
                .and_then(|section| section.get(kind.config_key()));

            match sub {
                Some(value) => {
                    let raw = serde_json::to_vec(value).map_err(|source| ConfigError::Serialize {
                        component: kind.config_key(),
                        source,
                    })?;
                    cfg.load_json(&raw)?;
                }
                None => {
                    tracing::warn!(component = %kind, "Missing configuration section, using defaults");
                    cfg.apply_defaults()?;
                }
            }
        }

        Ok(())
    }

    /// Render every registered component into one indented document.
    pub fn to_json(&self) -> Result<Vec<u8>, ConfigError> {
        let mut doc = Map::new();
        for (kind, cfg) in &self.components {
            let raw = cfg.to_json()?;
            let value: Value = serde_json::from_slice(&raw).map_err(|source| ConfigError::Decode {
                component: kind.config_key(),
                source,
            })?;

            let section = doc
                .entry(kind.section().as_str())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(section) = section {
                section.insert(kind.config_key().to_string(), value);
            }
        }
        encode_json(DOCUMENT, &Value::Object(doc))
    }

    pub fn load_from_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let raw = fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_json(&raw)?;
        tracing::info!(path = %path.display(), "Configuration loaded");
        Ok(())
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let mut raw = self.to_json()?;
        raw.push(b'\n');
        fs::write(path, raw).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Configuration saved");
        Ok(())
    }
}

/// Load and validate every known component from a JSON file.
pub fn load_config(path: &Path) -> Result<ConfigManager, ConfigError> {
    let mut manager = ConfigManager::with_all_components();
    manager.load_from_file(path)?;
    manager.validate()?;
    Ok(manager)
}

/// Every known component with its default values.
pub fn default_config() -> Result<ConfigManager, ConfigError> {
    let mut manager = ConfigManager::with_all_components();
    manager.apply_defaults()?;
    Ok(manager)
}
