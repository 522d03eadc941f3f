//! RT Token Relay - issues RumbleTalk login tokens on the server side
//!
//! Browser clients call `/token` and the relay performs the credentialed
//! call to the provider, so the API key never ships in client code.

pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod relay;
pub mod security;

// Re-export main components
pub use config::RelayConfig;
pub use constants::*;
pub use error::{RelayError, Result};
pub use handlers::routes;
pub use relay::{relay_token, HttpTokenProvider, ProviderRequest, TokenProvider, TokenQuery};
