use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::analytics::{compute_analytics, AnalyticsSummary};
use crate::models::{CreateCodeRequest, TrackedCode, UpdateCodeRequest};
use crate::qr::{self, QrRenderOptions};
use crate::storage::{CodeStore, StoreError};

pub struct AppState {
    pub store: Arc<CodeStore>,
    pub public_base_url: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub message: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn map_store_error(err: StoreError, context: &str) -> ApiError {
    match err {
        StoreError::NotFound => error_response(StatusCode::NOT_FOUND, "Code not found"),
        StoreError::Validation(message) => error_response(StatusCode::BAD_REQUEST, message),
        StoreError::Storage(e) => {
            tracing::error!("{context}: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, context)
        }
    }
}

/// Create a new tracked code
pub async fn create_code(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateCodeRequest>,
) -> Result<(StatusCode, Json<TrackedCode>), ApiError> {
    match state.store.create(payload, &state.public_base_url).await {
        Ok(code) => Ok((StatusCode::CREATED, Json(code))),
        Err(e) => Err(map_store_error(e, "Failed to create code")),
    }
}

/// List all tracked codes
pub async fn list_codes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TrackedCode>>, ApiError> {
    match state.store.list().await {
        Ok(codes) => Ok(Json(codes)),
        Err(e) => Err(map_store_error(e, "Failed to list codes")),
    }
}

/// Get a tracked code by id
pub async fn get_code(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TrackedCode>, ApiError> {
    match state.store.get(&id).await {
        Ok(Some(code)) => Ok(Json(code)),
        Ok(None) => Err(error_response(StatusCode::NOT_FOUND, "Code not found")),
        Err(e) => Err(map_store_error(e, "Failed to get code")),
    }
}

/// Update a tracked code's name and/or target URL
pub async fn update_code(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCodeRequest>,
) -> Result<Json<TrackedCode>, ApiError> {
    match state.store.update(&id, payload).await {
        Ok(code) => Ok(Json(code)),
        Err(e) => Err(map_store_error(e, "Failed to update code")),
    }
}

/// Delete a tracked code and its scan history
pub async fn delete_code(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    match state.store.delete(&id).await {
        Ok(true) => Ok(Json(SuccessResponse {
            message: "Code deleted successfully".to_string(),
        })),
        Ok(false) => Err(error_response(StatusCode::NOT_FOUND, "Code not found")),
        Err(e) => Err(map_store_error(e, "Failed to delete code")),
    }
}

/// Get the analytics summary for a tracked code
pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AnalyticsSummary>, ApiError> {
    match state.store.get(&id).await {
        Ok(Some(code)) => Ok(Json(compute_analytics(&code, Utc::now()))),
        Ok(None) => Err(error_response(StatusCode::NOT_FOUND, "Code not found")),
        Err(e) => Err(map_store_error(e, "Failed to compute analytics")),
    }
}

/// Render a tracked code's QR image as SVG
pub async fn get_qr_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(options): Query<QrRenderOptions>,
) -> Result<impl IntoResponse, ApiError> {
    let code = match state.store.get(&id).await {
        Ok(Some(code)) => code,
        Ok(None) => return Err(error_response(StatusCode::NOT_FOUND, "Code not found")),
        Err(e) => return Err(map_store_error(e, "Failed to get code")),
    };

    match qr::render_svg(&code.tracking_url, &options) {
        Ok(svg) => Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg)),
        Err(e) => {
            tracing::error!(code_id = %id, "Failed to render QR image: {e}");
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to render QR image",
            ))
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<SuccessResponse> {
    Json(SuccessResponse {
        message: "OK".to_string(),
    })
}
