//! `/token` boundary: runs the relay and turns its result into a reply

use std::convert::Infallible;
use std::sync::Arc;

use log::{debug, error, info, warn};
use uuid::Uuid;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::Reply;

use crate::config::RelayConfig;
use crate::error::{ErrorKind, RelayError};
use crate::relay::{relay_token, TokenProvider, TokenQuery};
use crate::security::with_api_security_headers;

/// Handle one token request. Never rejects; every outcome is a reply.
pub async fn handle_token(
    query: TokenQuery,
    config: Arc<RelayConfig>,
    provider: Arc<dyn TokenProvider>,
) -> Result<Response, Infallible> {
    let request_id = Uuid::new_v4();
    debug!(
        "[{}] Token request for username={:?} role={:?}",
        request_id, query.username, query.role
    );

    let reply = match relay_token(&query, &config, provider.as_ref()).await {
        Ok(payload) => {
            info!("[{}] Token issued", request_id);
            warp::reply::with_status(warp::reply::json(&payload), StatusCode::OK).into_response()
        }
        Err(err) => error_reply(request_id, &err),
    };

    Ok(with_api_security_headers(reply).into_response())
}

/// Translate a relay error into status and JSON body, logging by severity
pub fn error_reply(request_id: Uuid, err: &RelayError) -> Response {
    match err.kind() {
        ErrorKind::Validation => debug!("[{}] Rejected token request: {}", request_id, err),
        ErrorKind::Upstream => warn!("[{}] {}", request_id, err),
        ErrorKind::Unexpected => error!("[{}] Token relay failed: {}", request_id, err),
    }

    warp::reply::with_status(warp::reply::json(&err.body()), err.status()).into_response()
}
