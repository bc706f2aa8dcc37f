use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

pub mod body;
pub mod handlers;
pub mod state;
pub mod store;

pub use state::AppState;
pub use store::MemoryUserStore;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::index))
        .route("/favicon.ico", get(handlers::favicon))
        .route("/api", get(handlers::api_index))
        .route("/api/health", get(handlers::health))
        .route("/api/_echo", post(handlers::echo))
        .route("/api/news", get(handlers::news))
        .route("/api/signup", post(handlers::signup))
        .route("/api/login", post(handlers::login))
        .fallback(handlers::not_found)
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::{AppState, MemoryUserStore};
    pub use eldorado_core::{Error, Result};
}
