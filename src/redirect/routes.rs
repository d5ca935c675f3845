use axum::{routing::get, Router};
use std::sync::Arc;

use crate::storage::CodeStore;

use super::handlers::{health_check, track_and_redirect, RedirectState};

pub fn create_redirect_router(store: Arc<CodeStore>, fallback_url: String) -> Router {
    let state = Arc::new(RedirectState {
        store,
        fallback_url,
    });

    Router::new()
        .route("/", get(health_check))
        .route("/track/{id}", get(track_and_redirect))
        .with_state(state)
}
