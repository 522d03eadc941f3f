use std::sync::Arc;

use log::{error, info, warn};

use rt_token_relay::config::RelayConfig;
use rt_token_relay::handlers::routes;
use rt_token_relay::relay::{HttpTokenProvider, TokenProvider};

#[tokio::main]
async fn main() {
    // Initialize env before the logger so RUST_LOG can come from .env
    let dotenv_result = dotenvy::dotenv();

    // Initialize logging
    env_logger::init();

    match dotenv_result {
        Ok(path) => info!("Environment variables loaded from {}", path.display()),
        Err(e) => warn!("Failed to load .env file: {}", e),
    };

    let config = RelayConfig::from_env();
    config.log_warnings();

    info!("Configuration: {:?}", config);

    let provider: Arc<dyn TokenProvider> = match HttpTokenProvider::from_config(&config) {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    // Build the server address
    let addr = match config.listen_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Failed to parse server address: {}", e);
            std::process::exit(1);
        }
    };

    let routes = routes(Arc::new(config), provider);

    info!("RT token relay listening on {}", addr);

    warp::serve(routes).run(addr).await;
}
