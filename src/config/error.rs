//! Error type shared by every component configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::duration::DurationParseError;

/// Errors produced while defaulting, validating, loading or saving a
/// component configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The serialized bytes are not a well-formed document.
    #[error("error decoding {component} config: {source}")]
    Decode {
        component: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// An address string does not conform to the multiaddress grammar.
    #[error("error parsing {component}.{field}: {source}")]
    Parse {
        component: &'static str,
        field: &'static str,
        #[source]
        source: multiaddr::Error,
    },

    /// A duration string does not conform to the duration grammar.
    #[error("error parsing {component}.{field}: {source}")]
    DurationParse {
        component: &'static str,
        field: &'static str,
        #[source]
        source: DurationParseError,
    },

    /// A well-formed value violates a semantic invariant.
    #[error("{component}.{field} {reason}")]
    Validation {
        component: &'static str,
        field: &'static str,
        reason: &'static str,
    },

    /// A field could not be rendered to its external string form.
    #[error("error encoding {component}.{field}: {reason}")]
    Encode {
        component: &'static str,
        field: &'static str,
        reason: &'static str,
    },

    /// The schema record could not be encoded.
    #[error("error encoding {component} config: {source}")]
    Serialize {
        component: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// External name of the field the error is about, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConfigError::Parse { field, .. }
            | ConfigError::DurationParse { field, .. }
            | ConfigError::Validation { field, .. }
            | ConfigError::Encode { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// Key of the component the error is about, if any.
    pub fn component(&self) -> Option<&'static str> {
        match self {
            ConfigError::Decode { component, .. }
            | ConfigError::Parse { component, .. }
            | ConfigError::DurationParse { component, .. }
            | ConfigError::Validation { component, .. }
            | ConfigError::Encode { component, .. }
            | ConfigError::Serialize { component, .. } => Some(*component),
            ConfigError::Io { .. } => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ConfigError::Validation { .. })
    }
}
