// Listen address defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

// Routes
pub const TOKEN_PATH: &str = "token";
pub const HEALTH_PATH: &str = "health";
pub const ROOT_CONFIRMATION: &str = "RumbleTalk token server OK";

// warp cannot reflect arbitrary request headers, so preflights are checked
// against this list of headers browsers and common client libraries send
pub const CORS_ALLOWED_HEADERS: &[&str] = &[
    "accept",
    "accept-language",
    "authorization",
    "cache-control",
    "content-language",
    "content-type",
    "if-modified-since",
    "if-none-match",
    "origin",
    "pragma",
    "range",
    "x-api-key",
    "x-csrf-token",
    "x-request-id",
    "x-requested-with",
];

// Relay defaults
pub const DEFAULT_ROLE: &str = "user";

// Environment variables
pub const ENV_API_KEY: &str = "RT_API_KEY";
pub const ENV_API_SECRET: &str = "RT_API_SECRET";
pub const ENV_SEND_API_SECRET: &str = "RT_SEND_API_SECRET";
pub const ENV_ROOM_ID: &str = "RT_ROOM_ID";
pub const ENV_API_BASE: &str = "RT_API_BASE";
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
