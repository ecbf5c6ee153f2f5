use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::db::Database;
use crate::error::ApiError;
use crate::models::ClientPayload;

pub async fn list(State(db): State<Arc<Database>>) -> Result<impl IntoResponse, ApiError> {
    let clients = db.list_clients().await?;
    Ok(Json(clients))
}

pub async fn create(
    State(db): State<Arc<Database>>,
    Json(payload): Json<ClientPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let client = db.create_client(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Client added successfully!",
            "client": client,
        })),
    ))
}

pub async fn update(
    State(db): State<Arc<Database>>,
    Path(id): Path<i32>,
    Json(payload): Json<ClientPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let client = db.update_client(id, payload).await?;
    Ok(Json(json!({
        "message": "Client updated successfully!",
        "updatedClient": client,
    })))
}

pub async fn remove(
    State(db): State<Arc<Database>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let client = db.delete_client(id).await?;
    Ok(Json(json!({
        "message": "Client deleted successfully.",
        "deletedClient": client,
    })))
}
