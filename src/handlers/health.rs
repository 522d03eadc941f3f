//! Liveness endpoints

use crate::constants::ROOT_CONFIRMATION;

/// Fixed confirmation for `GET /`, independent of configuration
pub fn root_confirmation() -> &'static str {
    ROOT_CONFIRMATION
}

/// Probe body for `GET /health`
pub fn health() -> &'static str {
    "OK"
}
