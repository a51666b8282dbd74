// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info, warn};

use users_api::{
    api::router,
    config::{Config, StoreBackend},
    logging,
    state::AppState,
    storage::{InMemoryUserStore, MongoUserStore, UserStore},
};

#[tokio::main]
async fn main() {
    // A missing .env file is fine; real deployments use the environment
    dotenvy::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            logging::init(Default::default());
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };
    logging::init(config.log_format);

    if config.jwt_secret.is_none() {
        warn!("JWT_SECRET is not set; gated routes will answer 500 until it is configured");
    }

    let store: Arc<dyn UserStore> = match &config.store {
        StoreBackend::Mongo { uri, database } => match MongoUserStore::connect(uri, database).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                error!(error = %e, "Failed to connect to MongoDB");
                std::process::exit(1);
            }
        },
        StoreBackend::Memory => {
            warn!("Using in-memory user store; data is lost on restart");
            Arc::new(InMemoryUserStore::new())
        }
    };

    let app = router(AppState::from_config(&config, store));

    let addr = config.bind_address();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, %addr, "Failed to bind");
            std::process::exit(1);
        }
    };

    info!(%addr, "Users API listening (docs at /docs)");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "HTTP server failed");
        std::process::exit(1);
    }

    info!("Users API stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
