pub mod api;
pub mod auth;
pub mod config;
pub mod logic;
pub mod model;
pub mod store;

// Export API types
pub use api::routes;
pub use api::{ApiError, AppState};

pub use auth::TokenManager;
pub use config::{AppConfig, StoreBackend};

pub use logic::{
    AccountOperations, GitHubClient, OpError, OpResult, PostOperations, ProfileOperations,
};

// Export all model types
pub use model::*;

// Export store types
pub use store::{MemoryStore, PostgresStore, Store};

use axum::Router;
use log::info;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Wire a store into the full HTTP application using the auth and GitHub settings of `config`.
pub fn build_app<S: Store + 'static>(store: Arc<S>, config: &AppConfig) -> anyhow::Result<Router> {
    let tokens = TokenManager::new(&config.auth.jwt_secret).with_ttl_secs(config.auth.token_ttl_secs);
    let github = GitHubClient::new(&config.github)?;
    let state = AppState::new(store, tokens, github);
    Ok(routes::create_router().with_state(state))
}

/// Build the configured backend and serve until the listener fails.
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    let app = match config.database.backend {
        StoreBackend::Memory => {
            info!("Using in-memory store, data is lost on shutdown");
            build_app(Arc::new(MemoryStore::new()), &config)?
        }
        StoreBackend::Postgres => {
            info!("Connecting to PostgreSQL...");
            let database_url = config.database_url()?;
            let max_connections = config.database.max_connections.unwrap_or(20);
            let postgres_store = PostgresStore::new(&database_url, max_connections).await?;

            info!("Running database migrations...");
            postgres_store.migrate().await?;

            build_app(Arc::new(postgres_store), &config)?
        }
    };

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    info!("DevConnector API running on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
