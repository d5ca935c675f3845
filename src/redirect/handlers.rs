use axum::{
    extract::{Path, State},
    http::{header::USER_AGENT, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::models::ScanObservation;
use crate::storage::{CodeStore, StoreError};

pub struct RedirectState {
    pub store: Arc<CodeStore>,
    pub fallback_url: String,
}

/// Record a scan for the code and redirect to its target URL.
///
/// The scan is persisted before the response leaves this handler, so a
/// client reading analytics right after the hop already sees it. Redirects
/// are temporary (307) so intermediaries never cache the hop and bypass
/// recording. Unknown ids fall back to the configured home destination.
pub async fn track_and_redirect(
    State(state): State<Arc<RedirectState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let observation = ScanObservation {
        timestamp: Utc::now(),
        user_agent,
        // Reserved field; the in-scope flow never fills it.
        ip: None,
    };

    match state.store.record_scan(&id, observation).await {
        Ok(code) => Redirect::temporary(&code.target_url).into_response(),
        Err(StoreError::NotFound) => {
            tracing::warn!(code_id = %id, "Scan for unknown code, redirecting to fallback");
            Redirect::temporary(&state.fallback_url).into_response()
        }
        Err(e) => {
            // A failed write must never masquerade as a successful scan.
            tracing::error!(code_id = %id, "Failed to record scan: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    #[derive(Serialize)]
    struct HealthResponse {
        status: String,
    }

    Json(HealthResponse {
        status: "OK".to_string(),
    })
}
