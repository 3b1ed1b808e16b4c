//! HTTP server core
//!
//! Builds the axum router, wires the storage engine and auth gate, and runs
//! the listener. The /public subtree is served statically without a token;
//! everything under /api passes the bearer gate first.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::{Router, middleware};
use log::{error, info};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::config::ServerConfig;
use crate::server::auth::require_token;
use crate::server::handlers;
use crate::storage::roots::{RootStore, Visibility};
use crate::storage::StorageEngine;

/// Shared state for all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<StorageEngine>,
    pub api_token: Arc<str>,
}

pub struct Server {
    router: Router,
    socket_addr: String,
}

impl Server {
    pub fn new(config: &ServerConfig) -> Result<Self, std::io::Error> {
        let store = RootStore::new(&config.data_root_path())?;
        let public_root = store.root_path(Visibility::Exposed).to_path_buf();
        let state = AppState {
            engine: Arc::new(StorageEngine::new(store, &config.base_url)),
            api_token: Arc::from(config.api_token.as_str()),
        };

        let api = Router::new()
            .route(
                "/folders",
                get(handlers::list_root).post(handlers::create_folder),
            )
            .route(
                "/folders/{folder}",
                get(handlers::list_folder).delete(handlers::delete_folder),
            )
            .route(
                "/folders/{folder}/files/{filename}",
                put(handlers::store_file).delete(handlers::delete_file),
            )
            .route("/folders/{folder}/expose", post(handlers::expose_folder))
            .route(
                "/folders/{folder}/unexpose",
                post(handlers::unexpose_folder),
            )
            .route("/rename", post(handlers::rename_item))
            .layer(middleware::from_fn_with_state(state.clone(), require_token))
            .layer(DefaultBodyLimit::max(config.max_upload_bytes()));

        let router = Router::new()
            .nest("/api", api)
            .nest_service("/public", ServeDir::new(public_root))
            .with_state(state);

        Ok(Self {
            router,
            socket_addr: config.socket_addr(),
        })
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = match TcpListener::bind(&self.socket_addr).await {
            Ok(listener) => {
                info!("Server bound to {}", self.socket_addr);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", self.socket_addr, e);
                return Err(e);
            }
        };
        axum::serve(listener, self.router).await
    }
}
