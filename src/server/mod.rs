//! HTTP service exposing the task store as a REST resource.
//!
//! Routes:
//!
//! | Method   | Path          | Success            |
//! |----------|---------------|--------------------|
//! | `GET`    | `/tasks`      | 200, task array    |
//! | `POST`   | `/tasks`      | 201, created task  |
//! | `PUT`    | `/tasks/{id}` | 200, updated task  |
//! | `DELETE` | `/tasks/{id}` | 204, empty body    |
//! | `GET`    | `/health`     | 200, `{"status":"ok"}` |

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use todo_store::{InMemoryTaskStore, TaskStore};

use crate::config::{ServerConfig, StoreTarget};
use crate::error::StartupError;

pub use error::ApiError;

/// Shared application state
pub struct AppState {
    /// Store every handler reads and writes through.
    pub store: Arc<dyn TaskStore>,
}

/// Builds the task API router over `store`.
///
/// Cross-origin requests are allowed from any origin.
pub fn router(store: Arc<dyn TaskStore>) -> Router {
    let state = Arc::new(AppState { store });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route(
            "/tasks/{id}",
            put(handlers::update_task).delete(handlers::delete_task),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Opens the configured store and checks that it answers.
///
/// # Errors
///
/// - [`StartupError::StoreUnreachable`] if the store cannot be reached.
/// - [`StartupError::BackendUnavailable`] if the backend was compiled out.
pub async fn connect_store(target: &StoreTarget) -> Result<Arc<dyn TaskStore>, StartupError> {
    match target {
        StoreTarget::Memory => Ok(Arc::new(InMemoryTaskStore::in_memory())),
        #[cfg(feature = "redis")]
        StoreTarget::Redis { url, database } => {
            use todo_store::store::redis::RedisBackend;
            use todo_store::GenericTaskStore;

            let unreachable = |source: Box<dyn std::error::Error + Send + Sync>| {
                StartupError::StoreUnreachable {
                    target: target.to_string(),
                    source,
                }
            };

            let backend = RedisBackend::new(url)
                .await
                .map_err(|e| unreachable(Box::new(e)))?
                .with_prefix(database.as_str());
            let store = GenericTaskStore::new(backend);
            store.ping().await.map_err(|e| unreachable(Box::new(e)))?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "redis"))]
        StoreTarget::Redis { .. } => Err(StartupError::BackendUnavailable("redis")),
    }
}

/// Task API server
pub struct TaskServer;

impl TaskServer {
    /// Connects the store, binds the listen address and serves until Ctrl+C.
    ///
    /// Fails without serving if the store is unreachable.
    pub async fn start(config: ServerConfig) -> Result<(), StartupError> {
        let store = connect_store(&config.store).await?;
        info!("Connected to {}", config.store);

        let addr = config.addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| StartupError::Bind { addr, source })?;

        info!("Task server listening on http://{}", addr);
        Self::serve(listener, store).await
    }

    /// Serves the task API on an already-bound listener.
    pub async fn serve(
        listener: TcpListener,
        store: Arc<dyn TaskStore>,
    ) -> Result<(), StartupError> {
        axum::serve(listener, router(store))
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        info!("Task server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
