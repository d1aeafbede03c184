use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod models;
mod services;
mod utils;

use api::{CoinbaseClient, LnbitsClient, NodeClient, PriceFeed, WalletBackend};
use config::{BackendKind, Config};
use services::poll_service::Poller;
use services::{session_service, view_service};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pleb_wallet=debug,reqwest=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Pleb wallet...");

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    info!("Wallet backend: {:?} at {}", config.backend, config.backend_base_url);
    if config.backend == BackendKind::Lnbits && config.api_key.is_none() {
        warn!("No LNBITS_API_KEY set, wallet requests will likely be rejected");
    }

    // Read once; a missing token is the normal logged-out state
    let token = match session_service::load_token(&config.token_file) {
        Ok(t) => t,
        Err(e) => {
            warn!("{}, starting logged out", e);
            None
        }
    };

    let price_feed: Arc<dyn PriceFeed> = Arc::new(CoinbaseClient::new(config.price_base_url.clone()));
    let wallet: Arc<dyn WalletBackend> = match config.backend {
        BackendKind::Lnbits => Arc::new(LnbitsClient::new(
            config.backend_base_url.clone(),
            config.api_key.clone(),
        )),
        BackendKind::Node => Arc::new(NodeClient::new(config.backend_base_url.clone())),
    };

    let poller = Poller::new(price_feed, wallet, config.poller)
        .with_token(token)
        .activate();

    let view = view_service::run(poller.subscribe(), config.chart.clone());

    tokio::select! {
        _ = view => {
            warn!("View stopped unexpectedly");
        }
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                error!("Failed to listen for Ctrl-C: {}", e);
            }
            info!("Shutting down...");
        }
    }

    poller.teardown();
}
