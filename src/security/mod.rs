//! Response hardening for relay endpoints

pub mod headers;

pub use headers::with_api_security_headers;
