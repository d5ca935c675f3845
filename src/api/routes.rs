use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::storage::CodeStore;

use super::handlers::{
    create_code, delete_code, get_analytics, get_code, get_qr_image, health_check, list_codes,
    update_code, AppState,
};

pub fn create_api_router(store: Arc<CodeStore>, public_base_url: String) -> Router {
    let state = Arc::new(AppState {
        store,
        public_base_url,
    });

    Router::new()
        .route("/health", get(health_check))
        .route("/api/codes", post(create_code))
        .route("/api/codes", get(list_codes))
        .route("/api/codes/{id}", get(get_code))
        .route("/api/codes/{id}", put(update_code))
        .route("/api/codes/{id}", delete(delete_code))
        .route("/api/codes/{id}/analytics", get(get_analytics))
        .route("/api/codes/{id}/qr", get(get_qr_image))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
