//! Known components and key-based dispatch.
//!
//! The set of components is fixed at build time. A document section such as
//! `{"api": {"ipfsproxy": {...}}}` is routed by its key to the matching
//! [`ComponentKind`], which knows how to build an empty config for it.

use std::fmt;

use crate::config::error::ConfigError;
use crate::config::ipfsproxy::ProxyConfig;
use crate::config::numpin::InformerConfig;
use crate::config::ComponentConfig;

/// Top-level section of the aggregated document a component lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Api,
    Informer,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Api => "api",
            Section::Informer => "informer",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    IpfsProxy,
    NumPin,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 2] = [ComponentKind::IpfsProxy, ComponentKind::NumPin];

    pub fn config_key(&self) -> &'static str {
        match self {
            ComponentKind::IpfsProxy => ProxyConfig::CONFIG_KEY,
            ComponentKind::NumPin => InformerConfig::CONFIG_KEY,
        }
    }

    pub fn section(&self) -> Section {
        match self {
            ComponentKind::IpfsProxy => Section::Api,
            ComponentKind::NumPin => Section::Informer,
        }
    }

    /// Look up a component by its config key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.config_key() == key)
    }

    /// Build an empty config for this component.
    pub fn new_config(&self) -> AnyComponentConfig {
        match self {
            ComponentKind::IpfsProxy => AnyComponentConfig::IpfsProxy(ProxyConfig::default()),
            ComponentKind::NumPin => AnyComponentConfig::NumPin(InformerConfig::default()),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.config_key())
    }
}

/// A config of any known component.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyComponentConfig {
    IpfsProxy(ProxyConfig),
    NumPin(InformerConfig),
}

impl AnyComponentConfig {
    pub fn kind(&self) -> ComponentKind {
        match self {
            AnyComponentConfig::IpfsProxy(_) => ComponentKind::IpfsProxy,
            AnyComponentConfig::NumPin(_) => ComponentKind::NumPin,
        }
    }

    fn inner(&self) -> &dyn ComponentConfig {
        match self {
            AnyComponentConfig::IpfsProxy(cfg) => cfg,
            AnyComponentConfig::NumPin(cfg) => cfg,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ComponentConfig {
        match self {
            AnyComponentConfig::IpfsProxy(cfg) => cfg,
            AnyComponentConfig::NumPin(cfg) => cfg,
        }
    }
}

impl ComponentConfig for AnyComponentConfig {
    fn config_key(&self) -> &'static str {
        self.inner().config_key()
    }

    fn apply_defaults(&mut self) -> Result<(), ConfigError> {
        self.inner_mut().apply_defaults()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.inner().validate()
    }

    fn load_json(&mut self, raw: &[u8]) -> Result<(), ConfigError> {
        self.inner_mut().load_json(raw)
    }

    fn to_json(&self) -> Result<Vec<u8>, ConfigError> {
        self.inner().to_json()
    }
}

impl From<ProxyConfig> for AnyComponentConfig {
    fn from(cfg: ProxyConfig) -> Self {
        AnyComponentConfig::IpfsProxy(cfg)
    }
}

impl From<InformerConfig> for AnyComponentConfig {
    fn from(cfg: InformerConfig) -> Self {
        AnyComponentConfig::NumPin(cfg)
    }
}
