use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::db::Database;
use crate::error::ApiError;
use crate::models::InvoicePayload;

pub async fn list(State(db): State<Arc<Database>>) -> Result<impl IntoResponse, ApiError> {
    let invoices = db.list_invoices().await?;
    Ok(Json(invoices))
}

pub async fn create(
    State(db): State<Arc<Database>>,
    Json(payload): Json<InvoicePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let invoice = db.create_invoice(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Invoice added successfully!",
            "invoice": invoice,
        })),
    ))
}

pub async fn update(
    State(db): State<Arc<Database>>,
    Path(id): Path<String>,
    Json(payload): Json<InvoicePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let invoice = db.update_invoice(&id, payload).await?;
    Ok(Json(json!({
        "message": "Invoice updated successfully!",
        "updatedInvoice": invoice,
    })))
}

pub async fn remove(
    State(db): State<Arc<Database>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let invoice = db.delete_invoice(&id).await?;
    Ok(Json(json!({
        "message": "Invoice deleted successfully.",
        "deletedInvoice": invoice,
    })))
}
