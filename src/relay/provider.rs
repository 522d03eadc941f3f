//! Outbound transport to the provider's token endpoint

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::ProviderRequest;
use crate::config::RelayConfig;
use crate::constants::ENV_API_BASE;
use crate::error::{RelayError, Result};

/// Raw provider answer before interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    pub status: u16,
    pub body: String,
}

impl ProviderResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can issue a login token for a provider request
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Send the request once. Transport failures are errors; any HTTP status
    /// is a successful call.
    async fn issue(&self, request: &ProviderRequest) -> Result<ProviderResponse>;
}

/// `reqwest` client posting JSON to the configured endpoint with a bearer key
#[derive(Clone)]
pub struct HttpTokenProvider {
    client: Client,
    endpoint: Option<Url>,
    api_key: Option<String>,
}

impl HttpTokenProvider {
    pub fn new(client: Client, endpoint: Option<Url>, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint,
            api_key,
        }
    }

    /// Build a provider with a fresh client. No request timeout is set.
    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RelayError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::new(
            client,
            config.api_base.clone(),
            config.api_key.clone(),
        ))
    }
}

#[async_trait]
impl TokenProvider for HttpTokenProvider {
    async fn issue(&self, request: &ProviderRequest) -> Result<ProviderResponse> {
        let endpoint = self.endpoint.clone().ok_or_else(|| {
            RelayError::ConfigError(format!("{} is not configured", ENV_API_BASE))
        })?;

        let mut builder = self
            .client
            .post(endpoint)
            .json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(ProviderResponse { status, body })
    }
}
