//! Shelf Server - Entry Point
//!
//! An HTTP file store with a public/private visibility model: every folder
//! lives in exactly one of two roots, and only files under the public root
//! are servable.

use env_logger;
use log::{error, info};

use shelf_server::Server;
use shelf_server::config::ServerConfig;

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Launching shelf server on {}", config.socket_addr());

    let server = match Server::new(&config) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to initialize storage roots: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.start().await {
        error!("Server exited with error: {}", e);
        std::process::exit(1);
    }
}
