//! Configuration for the informer that reports the number of pins.

use serde::{Deserialize, Serialize};

use crate::config::duration::{parse_durations, DurationOpt, SignedDuration};
use crate::config::error::ConfigError;
use crate::config::validation::require_positive;
use crate::config::{decode_json, encode_json, ComponentConfig};

pub const DEFAULT_METRIC_TTL: SignedDuration = SignedDuration::from_secs(10);

/// Informer configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InformerConfig {
    /// How long an emitted metric stays valid. Must be positive.
    pub metric_ttl: SignedDuration,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct JsonConfig {
    metric_ttl: String,
}

impl InformerConfig {
    pub const CONFIG_KEY: &'static str = "numpin";

    pub fn with_defaults() -> Self {
        Self {
            metric_ttl: DEFAULT_METRIC_TTL,
        }
    }
}

impl ComponentConfig for InformerConfig {
    fn config_key(&self) -> &'static str {
        Self::CONFIG_KEY
    }

    fn apply_defaults(&mut self) -> Result<(), ConfigError> {
        self.metric_ttl = DEFAULT_METRIC_TTL;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require_positive(Self::CONFIG_KEY, "metric_ttl", self.metric_ttl)
    }

    fn load_json(&mut self, raw: &[u8]) -> Result<(), ConfigError> {
        let jcfg: JsonConfig = decode_json(Self::CONFIG_KEY, raw)?;

        self.apply_defaults()?;

        parse_durations(
            Self::CONFIG_KEY,
            [DurationOpt {
                name: "metric_ttl",
                input: &jcfg.metric_ttl,
                dst: &mut self.metric_ttl,
            }],
        )?;

        self.validate()
    }

    fn to_json(&self) -> Result<Vec<u8>, ConfigError> {
        let jcfg = JsonConfig {
            metric_ttl: self.metric_ttl.to_string(),
        };
        encode_json(Self::CONFIG_KEY, &jcfg)
    }
}
