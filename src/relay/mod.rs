//! Token relay core
//!
//! Validates the caller's query, builds the outbound provider request and
//! interprets the provider's answer. Nothing in here knows about HTTP
//! status codes on the inbound side; see `handlers::token` for that.

pub mod provider;

pub use provider::{HttpTokenProvider, ProviderResponse, TokenProvider};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::RelayConfig;
use crate::constants::DEFAULT_ROLE;
use crate::error::{RelayError, Result, VALIDATION_ERROR_MESSAGE};

/// Query parameters accepted on `/token`
#[derive(Debug, Clone, Default)]
pub struct TokenQuery {
    pub username: Option<String>,
    pub role: Option<String>,
    pub uid: Option<String>,
}

/// Collect decoded query pairs. The first occurrence of a repeated key wins
/// and unknown keys are ignored.
impl FromIterator<(String, String)> for TokenQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "username" => &mut query.username,
                "role" => &mut query.role,
                "uid" => &mut query.uid,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

/// JSON body sent to the provider's token endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRequest {
    pub username: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl ProviderRequest {
    /// Build the outbound request, rejecting a missing or empty username.
    ///
    /// `role` defaults only when absent; an explicit value is kept verbatim.
    pub fn from_query(query: &TokenQuery, config: &RelayConfig) -> Result<Self> {
        let username = match query.username.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                return Err(RelayError::ValidationError(
                    VALIDATION_ERROR_MESSAGE.to_string(),
                ))
            }
        };

        Ok(Self {
            username,
            role: query
                .role
                .clone()
                .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            uid: query.uid.clone(),
            room: config.room_id.clone(),
            secret: config.outbound_secret().map(str::to_string),
        })
    }
}

/// Relay one token request to the provider.
///
/// Exactly one call reaches `provider` when validation passes, none
/// otherwise. A 2xx answer is parsed as JSON and returned untouched.
pub async fn relay_token(
    query: &TokenQuery,
    config: &RelayConfig,
    provider: &dyn TokenProvider,
) -> Result<Value> {
    let request = ProviderRequest::from_query(query, config)?;
    let response = provider.issue(&request).await?;

    if !response.is_success() {
        return Err(RelayError::UpstreamError {
            status: response.status,
            body: response.body,
        });
    }

    Ok(serde_json::from_str(&response.body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every request and answers with a canned response
    struct RecordingProvider {
        response: std::result::Result<ProviderResponse, String>,
        seen: Mutex<Vec<ProviderRequest>>,
    }

    impl RecordingProvider {
        fn answering(status: u16, body: &str) -> Self {
            Self {
                response: Ok(ProviderResponse {
                    status,
                    body: body.to_string(),
                }),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(msg: &str) -> Self {
            Self {
                response: Err(msg.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<ProviderRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TokenProvider for RecordingProvider {
        async fn issue(&self, request: &ProviderRequest) -> Result<ProviderResponse> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.response {
                Ok(resp) => Ok(resp.clone()),
                Err(msg) => Err(RelayError::TransportError(msg.clone())),
            }
        }
    }

    fn query(username: Option<&str>, role: Option<&str>, uid: Option<&str>) -> TokenQuery {
        TokenQuery {
            username: username.map(str::to_string),
            role: role.map(str::to_string),
            uid: uid.map(str::to_string),
        }
    }

    fn config() -> RelayConfig {
        RelayConfig::from_lookup(|_| None)
    }

    #[tokio::test]
    async fn test_missing_username_makes_no_call() {
        let provider = RecordingProvider::answering(200, r#"{"token":"t"}"#);

        for q in [query(None, Some("admin"), None), query(Some(""), None, None)] {
            let err = relay_token(&q, &config(), &provider).await.unwrap_err();
            assert!(matches!(err, RelayError::ValidationError(_)));
        }

        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_role_defaults_to_user() {
        let provider = RecordingProvider::answering(200, r#"{"token":"t"}"#);
        relay_token(&query(Some("Max"), None, None), &config(), &provider)
            .await
            .unwrap();

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].username, "Max");
        assert_eq!(calls[0].role, "user");
        assert_eq!(calls[0].uid, None);
    }

    #[tokio::test]
    async fn test_explicit_role_and_uid_are_forwarded() {
        let provider = RecordingProvider::answering(200, r#"{"token":"t"}"#);
        relay_token(
            &query(Some("Max"), Some("moderator"), Some("u_abc123")),
            &config(),
            &provider,
        )
        .await
        .unwrap();

        let calls = provider.calls();
        assert_eq!(calls[0].role, "moderator");
        assert_eq!(calls[0].uid.as_deref(), Some("u_abc123"));
    }

    #[tokio::test]
    async fn test_room_and_secret_come_from_config() {
        let config = RelayConfig::from_lookup(|name| match name {
            "RT_ROOM_ID" => Some("lobby".to_string()),
            "RT_API_SECRET" => Some("s3cret".to_string()),
            "RT_SEND_API_SECRET" => Some("true".to_string()),
            _ => None,
        });
        let provider = RecordingProvider::answering(200, r#"{"token":"t"}"#);
        relay_token(&query(Some("Max"), None, None), &config, &provider)
            .await
            .unwrap();

        let calls = provider.calls();
        assert_eq!(calls[0].room.as_deref(), Some("lobby"));
        assert_eq!(calls[0].secret.as_deref(), Some("s3cret"));
    }

    #[tokio::test]
    async fn test_success_body_is_passed_through() {
        let provider = RecordingProvider::answering(201, r#"{"token":"abc123","expires":60}"#);
        let payload = relay_token(&query(Some("Max"), None, None), &config(), &provider)
            .await
            .unwrap();

        assert_eq!(payload, serde_json::json!({ "token": "abc123", "expires": 60 }));
    }

    #[tokio::test]
    async fn test_non_success_becomes_upstream_error() {
        let provider = RecordingProvider::answering(403, "forbidden");
        let err = relay_token(&query(Some("Max"), None, None), &config(), &provider)
            .await
            .unwrap_err();

        match err {
            RelayError::UpstreamError { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "forbidden");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_success_is_malformed() {
        let provider = RecordingProvider::answering(200, "<html>ok</html>");
        let err = relay_token(&query(Some("Max"), None, None), &config(), &provider)
            .await
            .unwrap_err();

        assert!(matches!(err, RelayError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_transport_failure_is_propagated() {
        let provider = RecordingProvider::failing("connection refused");
        let err = relay_token(&query(Some("Max"), None, None), &config(), &provider)
            .await
            .unwrap_err();

        assert!(matches!(err, RelayError::TransportError(_)));
        assert_eq!(provider.calls().len(), 1);
    }

    #[test]
    fn test_query_pairs_first_occurrence_wins() {
        let pairs = [
            ("username", "a"),
            ("debug", "1"),
            ("username", "b"),
            ("role", "moderator"),
            ("role", "admin"),
        ];
        let q: TokenQuery = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        assert_eq!(q.username.as_deref(), Some("a"));
        assert_eq!(q.role.as_deref(), Some("moderator"));
        assert_eq!(q.uid, None);
    }

    #[test]
    fn test_outbound_body_omits_absent_fields() {
        let request = ProviderRequest::from_query(&query(Some("Max"), Some(""), None), &config())
            .unwrap();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json, serde_json::json!({ "username": "Max", "role": "" }));
    }
}
