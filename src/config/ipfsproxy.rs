//! Configuration for the proxy that fronts the IPFS daemon API.

use std::net::SocketAddr;

use multiaddr::Multiaddr;
use serde::{Deserialize, Serialize};

use crate::config::addr::{format_addr, parse_addr, to_socket_addr};
use crate::config::duration::{parse_durations, DurationOpt, SignedDuration};
use crate::config::error::ConfigError;
use crate::config::validation::{require_addr, require_non_negative};
use crate::config::{decode_json, encode_json, ComponentConfig};

pub const DEFAULT_PROXY_ADDR: &str = "/ip4/127.0.0.1/tcp/9095";
pub const DEFAULT_NODE_ADDR: &str = "/ip4/127.0.0.1/tcp/5001";
pub const DEFAULT_PROXY_READ_TIMEOUT: SignedDuration = SignedDuration::ZERO;
pub const DEFAULT_PROXY_READ_HEADER_TIMEOUT: SignedDuration = SignedDuration::from_secs(5);
pub const DEFAULT_PROXY_WRITE_TIMEOUT: SignedDuration = SignedDuration::ZERO;
pub const DEFAULT_PROXY_IDLE_TIMEOUT: SignedDuration = SignedDuration::from_secs(60);

/// Proxy configuration.
///
/// A value built with `ProxyConfig::default()` is empty: both addresses
/// unset and every timeout zero. Call [`ComponentConfig::apply_defaults`]
/// or [`ComponentConfig::load_json`] before use.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProxyConfig {
    /// Listen address of the proxy.
    pub proxy_addr: Option<Multiaddr>,

    /// API address of the IPFS daemon.
    pub node_addr: Option<Multiaddr>,

    /// Maximum time to read a full request. Zero disables the timeout.
    pub proxy_read_timeout: SignedDuration,

    /// Maximum time to read the request headers.
    pub proxy_read_header_timeout: SignedDuration,

    /// Maximum time to write the response. Zero disables the timeout.
    pub proxy_write_timeout: SignedDuration,

    /// How long an idle keep-alive connection is kept open.
    pub proxy_idle_timeout: SignedDuration,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct JsonConfig {
    proxy_listen_multiaddress: String,
    node_multiaddress: String,
    proxy_read_timeout: String,
    proxy_read_header_timeout: String,
    proxy_write_timeout: String,
    proxy_idle_timeout: String,
}

impl ProxyConfig {
    pub const CONFIG_KEY: &'static str = "ipfsproxy";

    /// A config populated with the built-in defaults.
    pub fn with_defaults() -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        cfg.apply_defaults()?;
        Ok(cfg)
    }

    /// Listen address as a socket address, if it is a plain TCP address.
    pub fn proxy_socket_addr(&self) -> Option<SocketAddr> {
        self.proxy_addr.as_ref().and_then(to_socket_addr)
    }

    /// Daemon address as a socket address, if it is a plain TCP address.
    pub fn node_socket_addr(&self) -> Option<SocketAddr> {
        self.node_addr.as_ref().and_then(to_socket_addr)
    }
}

impl ComponentConfig for ProxyConfig {
    fn config_key(&self) -> &'static str {
        Self::CONFIG_KEY
    }

    fn apply_defaults(&mut self) -> Result<(), ConfigError> {
        self.proxy_addr = parse_addr(Self::CONFIG_KEY, "proxy_listen_multiaddress", DEFAULT_PROXY_ADDR)?;
        self.node_addr = parse_addr(Self::CONFIG_KEY, "node_multiaddress", DEFAULT_NODE_ADDR)?;
        self.proxy_read_timeout = DEFAULT_PROXY_READ_TIMEOUT;
        self.proxy_read_header_timeout = DEFAULT_PROXY_READ_HEADER_TIMEOUT;
        self.proxy_write_timeout = DEFAULT_PROXY_WRITE_TIMEOUT;
        self.proxy_idle_timeout = DEFAULT_PROXY_IDLE_TIMEOUT;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let key = Self::CONFIG_KEY;
        require_addr(key, "proxy_listen_multiaddress", self.proxy_addr.as_ref())?;
        require_addr(key, "node_multiaddress", self.node_addr.as_ref())?;
        require_non_negative(key, "proxy_read_timeout", self.proxy_read_timeout)?;
        require_non_negative(key, "proxy_read_header_timeout", self.proxy_read_header_timeout)?;
        require_non_negative(key, "proxy_write_timeout", self.proxy_write_timeout)?;
        require_non_negative(key, "proxy_idle_timeout", self.proxy_idle_timeout)?;
        Ok(())
    }

    fn load_json(&mut self, raw: &[u8]) -> Result<(), ConfigError> {
        let jcfg: JsonConfig = decode_json(Self::CONFIG_KEY, raw)?;

        self.apply_defaults()?;

        if let Some(addr) = parse_addr(
            Self::CONFIG_KEY,
            "proxy_listen_multiaddress",
            &jcfg.proxy_listen_multiaddress,
        )? {
            self.proxy_addr = Some(addr);
        }
        if let Some(addr) = parse_addr(Self::CONFIG_KEY, "node_multiaddress", &jcfg.node_multiaddress)? {
            self.node_addr = Some(addr);
        }

        parse_durations(
            Self::CONFIG_KEY,
            [
                DurationOpt {
                    name: "proxy_read_timeout",
                    input: &jcfg.proxy_read_timeout,
                    dst: &mut self.proxy_read_timeout,
                },
                DurationOpt {
                    name: "proxy_read_header_timeout",
                    input: &jcfg.proxy_read_header_timeout,
                    dst: &mut self.proxy_read_header_timeout,
                },
                DurationOpt {
                    name: "proxy_write_timeout",
                    input: &jcfg.proxy_write_timeout,
                    dst: &mut self.proxy_write_timeout,
                },
                DurationOpt {
                    name: "proxy_idle_timeout",
                    input: &jcfg.proxy_idle_timeout,
                    dst: &mut self.proxy_idle_timeout,
                },
            ],
        )?;

        self.validate()
    }

    fn to_json(&self) -> Result<Vec<u8>, ConfigError> {
        let key = Self::CONFIG_KEY;
        let jcfg = JsonConfig {
            proxy_listen_multiaddress: format_addr(key, "proxy_listen_multiaddress", self.proxy_addr.as_ref())?,
            node_multiaddress: format_addr(key, "node_multiaddress", self.node_addr.as_ref())?,
            proxy_read_timeout: self.proxy_read_timeout.to_string(),
            proxy_read_header_timeout: self.proxy_read_header_timeout.to_string(),
            proxy_write_timeout: self.proxy_write_timeout.to_string(),
            proxy_idle_timeout: self.proxy_idle_timeout.to_string(),
        };
        encode_json(key, &jcfg)
    }
}
