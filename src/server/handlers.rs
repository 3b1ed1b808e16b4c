//! Request handlers
//!
//! Maps HTTP requests onto engine operations and shapes every response into
//! the JSON envelope: `{"status":"ok", ...}` on success, and
//! `{"status":"error","message":...}` with a 4xx/5xx code on failure.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use log::error;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::StorageError;
use crate::server::core::AppState;
use crate::storage::ItemKind;

/// An error already mapped to an HTTP status and a client-safe message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "unauthorized".to_string(),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(error: StorageError) -> Self {
        let status = match &error {
            StorageError::Validation(_) => StatusCode::BAD_REQUEST,
            e if e.is_not_found() => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Internal failures are logged in full but reported generically so
        // filesystem paths never reach the client.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Internal storage error: {}", error);
            "internal server error".to_string()
        } else {
            error.to_string()
        };
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "status": "error", "message": self.message }));
        (self.status, body).into_response()
    }
}

/// Wrap an operation result in the success envelope.
fn ok(result: impl serde::Serialize) -> Response {
    let mut body = match serde_json::to_value(result) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            let mut map = serde_json::Map::new();
            map.insert("result".to_string(), other);
            map
        }
        Err(e) => {
            error!("Failed to serialize response: {}", e);
            return ApiError::from(StorageError::IoError(std::io::Error::other(e)))
                .into_response();
        }
    };
    body.insert("status".to_string(), json!("ok"));
    Json(Value::Object(body)).into_response()
}

#[derive(Debug, Deserialize)]
pub struct CreateFolderRequest {
    pub folder: String,
    #[serde(default)]
    pub expose: bool,
}

#[derive(Debug, Deserialize)]
pub struct ExposeQuery {
    #[serde(default)]
    pub expose: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameRequest {
    pub kind: ItemKind,
    pub folder: String,
    #[serde(default)]
    pub filename: Option<String>,
    pub new_name: String,
}

pub async fn create_folder(
    State(state): State<AppState>,
    Json(request): Json<CreateFolderRequest>,
) -> Result<Response, ApiError> {
    let created = state.engine.create_folder(&request.folder, request.expose)?;
    Ok(ok(created))
}

pub async fn store_file(
    State(state): State<AppState>,
    Path((folder, filename)): Path<(String, String)>,
    Query(query): Query<ExposeQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let stored = state
        .engine
        .store_file(&folder, &filename, &body, query.expose)?;
    Ok(ok(stored))
}

pub async fn delete_folder(
    State(state): State<AppState>,
    Path(folder): Path<String>,
) -> Result<Response, ApiError> {
    let deleted = state.engine.delete(&folder, None)?;
    Ok(ok(deleted))
}

pub async fn delete_file(
    State(state): State<AppState>,
    Path((folder, filename)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let deleted = state.engine.delete(&folder, Some(&filename))?;
    Ok(ok(deleted))
}

pub async fn rename_item(
    State(state): State<AppState>,
    Json(request): Json<RenameRequest>,
) -> Result<Response, ApiError> {
    let renamed = state.engine.rename(
        request.kind,
        &request.folder,
        request.filename.as_deref(),
        &request.new_name,
    )?;
    Ok(ok(renamed))
}

pub async fn expose_folder(
    State(state): State<AppState>,
    Path(folder): Path<String>,
) -> Result<Response, ApiError> {
    let changed = state.engine.expose(&folder)?;
    Ok(ok(changed))
}

pub async fn unexpose_folder(
    State(state): State<AppState>,
    Path(folder): Path<String>,
) -> Result<Response, ApiError> {
    let changed = state.engine.unexpose(&folder)?;
    Ok(ok(changed))
}

pub async fn list_folder(
    State(state): State<AppState>,
    Path(folder): Path<String>,
) -> Result<Response, ApiError> {
    let listing = state.engine.list_folder(&folder)?;
    Ok(ok(listing))
}

pub async fn list_root(State(state): State<AppState>) -> Result<Response, ApiError> {
    let listing = state.engine.list_root()?;
    Ok(ok(listing))
}
