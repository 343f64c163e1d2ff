// 🌐 HTTP API - list and create expenses

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use log::{error, info, warn};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use crate::error::StoreError;
use crate::expense::{Expense, NewExpense};
use crate::store::ExpenseStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<ExpenseStore>>,
}

impl AppState {
    pub fn new(store: ExpenseStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Lock the store. A panic in another handler does not leave the list unusable.
    pub fn lock_store(&self) -> MutexGuard<'_, ExpenseStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Save the store if it holds records that never reached disk.
    pub fn flush(&self) -> Result<bool, StoreError> {
        let mut store = self.lock_store();
        if !store.has_unsaved_changes() {
            return Ok(false);
        }
        store.save()?;
        Ok(true)
    }
}

/// Error body: `{"error": "<message>"}`
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// Handler failure carrying the status and message sent to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: &'static str,
}

impl ApiError {
    pub const INVALID_DATA: &'static str = "invalid data";
    pub const SAVE_FAILED: &'static str = "save failed";

    fn bad_request(message: &'static str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }

    fn internal(message: &'static str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /expenses - All expenses, insertion order, indented JSON
async fn list_expenses(State(state): State<AppState>) -> Result<Response, ApiError> {
    let store = state.lock_store();

    let body = serde_json::to_string_pretty(store.all()).map_err(|e| {
        error!("Failed to encode expenses: {}", e);
        ApiError::internal("encode failed")
    })?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        body,
    )
        .into_response())
}

/// POST /expenses - Validate, derive id, append, persist
///
/// The body is decoded as a JSON object whatever its `Content-Type`. If saving fails the
/// record stays in memory and the client gets a 500.
async fn create_expense(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    let payload = NewExpense::from_json(&body).map_err(|e| {
        warn!("Rejected expense body: {}", e);
        ApiError::bad_request(ApiError::INVALID_DATA)
    })?;

    let expense = payload.into_expense().map_err(|missing| {
        warn!("Rejected expense: {}", missing);
        ApiError::bad_request(missing.message())
    })?;

    // Held across append and save so creates are written one at a time
    let mut store = state.lock_store();
    store.append(expense.clone());

    if let Err(e) = store.save() {
        error!("Failed to save expense {}: {}", expense.id, e);
        return Err(ApiError::internal(ApiError::SAVE_FAILED));
    }

    info!("Created expense {} ({} total)", expense.id, store.len());
    Ok((StatusCode::CREATED, Json(expense)))
}

/// Log method, path, status and latency of every request
async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        "{} {} -> {} in {:?}",
        method,
        path,
        response.status().as_u16(),
        started.elapsed()
    );
    response
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .with_state(state)
        .layer(middleware::from_fn(log_requests))
        .layer(CorsLayer::permissive())
}
