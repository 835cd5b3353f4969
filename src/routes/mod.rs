use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{chat::ChatSession, providers::MovieDataProvider, recommendations::Recommender},
};

pub mod chat;
pub mod recommendations;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    /// In-memory chat sessions; cleared on restart
    pub sessions: Arc<RwLock<HashMap<Uuid, ChatSession>>>,
}

impl AppState {
    pub fn new(provider: Arc<dyn MovieDataProvider>) -> Self {
        Self {
            recommender: Arc::new(Recommender::new(provider)),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api/v1
fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/recommendations", post(recommendations::recommend))
        .route("/chat", post(chat::message))
        .route("/chat/reset", post(chat::reset))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
