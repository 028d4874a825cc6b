//! Endpoint address helpers.
//!
//! Addresses are multiaddresses such as `/ip4/127.0.0.1/tcp/9095`.

use std::net::{IpAddr, SocketAddr};

use multiaddr::{Multiaddr, Protocol};

use crate::config::error::ConfigError;

/// Parse an address field. Empty input yields `None` (keep the default).
pub fn parse_addr(
    component: &'static str,
    field: &'static str,
    input: &str,
) -> Result<Option<Multiaddr>, ConfigError> {
    if input.is_empty() {
        tracing::debug!(component, field, "address not set, keeping default");
        return Ok(None);
    }
    input
        .parse::<Multiaddr>()
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            component,
            field,
            source,
        })
}

/// Render an address field, checking it is set and has a protocol stack.
pub fn format_addr(
    component: &'static str,
    field: &'static str,
    addr: Option<&Multiaddr>,
) -> Result<String, ConfigError> {
    let addr = addr.ok_or(ConfigError::Encode {
        component,
        field,
        reason: "address not set",
    })?;
    if addr.iter().next().is_none() {
        return Err(ConfigError::Encode {
            component,
            field,
            reason: "empty multiaddress",
        });
    }
    Ok(addr.to_string())
}

/// Resolve an `/ip4|ip6/<ip>/tcp/<port>` address to a socket address.
pub fn to_socket_addr(addr: &Multiaddr) -> Option<SocketAddr> {
    let mut iter = addr.iter();
    let ip: IpAddr = match iter.next()? {
        Protocol::Ip4(ip) => ip.into(),
        Protocol::Ip6(ip) => ip.into(),
        _ => return None,
    };
    let port = match iter.next()? {
        Protocol::Tcp(port) => port,
        _ => return None,
    };
    if iter.next().is_some() {
        return None;
    }
    Some(SocketAddr::new(ip, port))
}
