use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::db::Database;
use crate::error::ApiError;
use crate::models::InvoiceItemPayload;

pub async fn list(
    State(db): State<Arc<Database>>,
    Path(invoice_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let items = db.list_invoice_items(&invoice_id).await?;
    Ok(Json(items))
}

pub async fn create(
    State(db): State<Arc<Database>>,
    Json(payload): Json<InvoiceItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let item = db.create_invoice_item(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Invoice item added successfully!",
            "item": item,
        })),
    ))
}

pub async fn update(
    State(db): State<Arc<Database>>,
    Path(id): Path<String>,
    Json(payload): Json<InvoiceItemPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let item = db.update_invoice_item(&id, payload).await?;
    Ok(Json(json!({
        "message": "Invoice item updated successfully!",
        "updatedItem": item,
    })))
}

pub async fn remove(
    State(db): State<Arc<Database>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let item = db.delete_invoice_item(&id).await?;
    Ok(Json(json!({
        "message": "Invoice item deleted successfully.",
        "deletedItem": item,
    })))
}
