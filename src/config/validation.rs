//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Required addresses are present
//! - Durations are within range (not negative, or strictly positive)
//!
//! # Design Decisions
//! - Returns the first violation only, checks run in field order
//! - Validation is a pure function of the field values

use multiaddr::Multiaddr;

use crate::config::duration::SignedDuration;
use crate::config::error::ConfigError;

/// Require an address to be set and to have at least one protocol.
pub fn require_addr(
    component: &'static str,
    field: &'static str,
    addr: Option<&Multiaddr>,
) -> Result<(), ConfigError> {
    match addr {
        None => Err(ConfigError::Validation {
            component,
            field,
            reason: "not set",
        }),
        Some(addr) if addr.iter().next().is_none() => Err(ConfigError::Validation {
            component,
            field,
            reason: "is empty",
        }),
        Some(_) => Ok(()),
    }
}

/// Require a duration to be zero or more.
pub fn require_non_negative(
    component: &'static str,
    field: &'static str,
    value: SignedDuration,
) -> Result<(), ConfigError> {
    if value.is_negative() {
        return Err(ConfigError::Validation {
            component,
            field,
            reason: "is invalid",
        });
    }
    Ok(())
}

/// Require a duration to be strictly greater than zero.
pub fn require_positive(
    component: &'static str,
    field: &'static str,
    value: SignedDuration,
) -> Result<(), ConfigError> {
    if !value.is_positive() {
        return Err(ConfigError::Validation {
            component,
            field,
            reason: "is invalid",
        });
    }
    Ok(())
}
