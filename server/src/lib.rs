//! RPC front end for remote lock/unlock.
//!
//! # Overview
//! Serves `remote_action.v1.RemoteActionService/ToggleLock` as JSON over
//! HTTP. Each call is translated by `remote-action-core` into one request
//! against the telematics backend and the reply is normalized back into the
//! RPC response.

pub mod config;
pub mod error;
pub mod rpc;
pub mod service;
pub mod transport;

use axum::{extract::State, routing::post, Json, Router};
use tokio::net::TcpListener;

pub use config::ServerConfig;
pub use error::ServiceError;
pub use rpc::{LockAction, RemoteActionResponse, ResponseString, ToggleLockRequest};
pub use service::ActionService;

pub fn app(service: ActionService) -> Router {
    Router::new()
        .route(rpc::TOGGLE_LOCK_PATH, post(toggle_lock))
        .with_state(service)
}

pub async fn run(listener: TcpListener, service: ActionService) -> Result<(), std::io::Error> {
    axum::serve(listener, app(service)).await
}

async fn toggle_lock(
    State(service): State<ActionService>,
    Json(request): Json<ToggleLockRequest>,
) -> Result<Json<RemoteActionResponse>, ServiceError> {
    service.toggle_lock(request).await.map(Json)
}
