//! Relay configuration module
//! Reads the provider credentials and listen address once at startup

use crate::constants::{
    DEFAULT_HOST, DEFAULT_PORT, ENV_API_BASE, ENV_API_KEY, ENV_API_SECRET, ENV_HOST, ENV_PORT,
    ENV_ROOM_ID, ENV_SEND_API_SECRET,
};
use crate::error::{RelayError, Result};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use url::Url;

/// Relay configuration parameters
#[derive(Clone)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    /// Bearer credential presented to the provider
    pub api_key: Option<String>,
    /// Secondary credential, only sent when `send_api_secret` is set
    pub api_secret: Option<String>,
    pub send_api_secret: bool,
    /// Room identifier included in every outbound request when set
    pub room_id: Option<String>,
    /// Provider token endpoint
    pub api_base: Option<Url>,
}

impl RelayConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset. An `RT_API_BASE` that is not a
    /// valid absolute URL is logged and treated as unset, so the process
    /// still starts and token requests fail with a server error.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = var(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = var(ENV_PORT)
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let api_base = var(ENV_API_BASE).and_then(|raw| match Url::parse(raw.trim()) {
            Ok(url) => Some(url),
            Err(e) => {
                log::warn!("Ignoring invalid {}: {}", ENV_API_BASE, e);
                None
            }
        });

        let send_api_secret = var(ENV_SEND_API_SECRET)
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false);

        Self {
            host,
            port,
            api_key: var(ENV_API_KEY),
            api_secret: var(ENV_API_SECRET),
            send_api_secret,
            room_id: var(ENV_ROOM_ID),
            api_base,
        }
    }

    /// Socket address to listen on. `HOST` may be IPv4 or IPv6.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .trim_matches(|c: char| c == '[' || c == ']')
            .parse()
            .map_err(|e| {
                RelayError::ConfigError(format!("Invalid {} '{}': {}", ENV_HOST, self.host, e))
            })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Names of required variables that are not set
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key.is_none() {
            missing.push(ENV_API_KEY);
        }
        if self.api_base.is_none() {
            missing.push(ENV_API_BASE);
        }
        missing
    }

    /// The secret to put in the outbound body, if the operator opted in
    pub fn outbound_secret(&self) -> Option<&str> {
        if self.send_api_secret {
            self.api_secret.as_deref()
        } else {
            None
        }
    }

    /// Report incomplete configuration. Never refuses to start.
    pub fn log_warnings(&self) {
        let missing = self.missing_required();
        if !missing.is_empty() {
            log::warn!(
                "Missing environment variables: {} (and {}/{} if your account needs them)",
                missing.join(", "),
                ENV_API_SECRET,
                ENV_ROOM_ID
            );
        }
        if self.send_api_secret && self.api_secret.is_none() {
            log::warn!(
                "{} is enabled but {} is not set",
                ENV_SEND_API_SECRET,
                ENV_API_SECRET
            );
        }
    }
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("RelayConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &redact(&self.api_key))
            .field("api_secret", &redact(&self.api_secret))
            .field("send_api_secret", &self.send_api_secret)
            .field("room_id", &self.room_id)
            .field("api_base", &self.api_base.as_ref().map(Url::as_str))
            .finish()
    }
}
