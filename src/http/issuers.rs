use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::db::Database;
use crate::error::ApiError;
use crate::models::IssuerPayload;

pub async fn list(State(db): State<Arc<Database>>) -> Result<impl IntoResponse, ApiError> {
    let issuers = db.list_issuers().await?;
    Ok(Json(issuers))
}

pub async fn create(
    State(db): State<Arc<Database>>,
    Json(payload): Json<IssuerPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let issuer = db.create_issuer(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Issuer added successfully!",
            "issuer": issuer,
        })),
    ))
}

pub async fn update(
    State(db): State<Arc<Database>>,
    Path(id): Path<i32>,
    Json(payload): Json<IssuerPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let issuer = db.update_issuer(id, payload).await?;
    Ok(Json(json!({
        "message": "Issuer updated successfully!",
        "updatedIssuer": issuer,
    })))
}

pub async fn remove(
    State(db): State<Arc<Database>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let issuer = db.delete_issuer(id).await?;
    Ok(Json(json!({
        "message": "Issuer deleted successfully.",
        "deletedIssuer": issuer,
    })))
}
