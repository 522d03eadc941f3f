//! Request handlers and route assembly

pub mod health;
pub mod token;

pub use token::handle_token;

use std::convert::Infallible;
use std::sync::Arc;

use warp::{Filter, Rejection, Reply};

use crate::config::RelayConfig;
use crate::constants::{CORS_ALLOWED_HEADERS, HEALTH_PATH, TOKEN_PATH};
use crate::relay::{TokenProvider, TokenQuery};

/// All relay routes with CORS open to any origin and access logging
pub fn routes(
    config: Arc<RelayConfig>,
    provider: Arc<dyn TokenProvider>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let root_route = warp::path::end()
        .and(get_or_head())
        .map(health::root_confirmation);

    let health_route = warp::path(HEALTH_PATH)
        .and(warp::path::end())
        .and(get_or_head())
        .map(health::health);

    // Pairs never fail to decode, so repeated keys still reach the handler
    let token_route = warp::path(TOKEN_PATH)
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<Vec<(String, String)>>())
        .map(|pairs: Vec<(String, String)>| pairs.into_iter().collect::<TokenQuery>())
        .and(with_config(config))
        .and(with_provider(provider))
        .and_then(handle_token);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "HEAD", "OPTIONS"])
        .allow_headers(CORS_ALLOWED_HEADERS.iter().copied());

    root_route
        .or(health_route)
        .or(token_route)
        .with(cors)
        .with(warp::log("rt_token_relay::access"))
}

// Health checkers may use HEAD instead of GET
fn get_or_head() -> impl Filter<Extract = (), Error = Rejection> + Clone {
    warp::get().or(warp::head()).unify()
}

// Helper function to include the configuration in request
fn with_config(
    config: Arc<RelayConfig>,
) -> impl Filter<Extract = (Arc<RelayConfig>,), Error = Infallible> + Clone {
    warp::any().map(move || config.clone())
}

// Helper function to include the provider in request
fn with_provider(
    provider: Arc<dyn TokenProvider>,
) -> impl Filter<Extract = (Arc<dyn TokenProvider>,), Error = Infallible> + Clone {
    warp::any().map(move || provider.clone())
}
