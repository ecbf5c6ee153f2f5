//! HTTP surface: route table and per-entity handlers. Handlers only
//! extract parameters, call one repository operation, and shape the
//! JSON response; status codes come from the error taxonomy.

pub mod issuers;
pub mod clients;
pub mod invoices;
pub mod items;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::db::Database;

async fn root() -> &'static str {
    "Hello"
}

/// Build the application router over a shared database handle.
pub fn router(db: Arc<Database>) -> Router {
    Router::new()
        .route("/", get(root))
        // Issuers
        .route("/allissuers", get(issuers::list))
        .route("/addissuer", post(issuers::create))
        .route("/editissuer/:id", put(issuers::update))
        .route("/deleteissuer/:id", delete(issuers::remove))
        // Clients
        .route("/allclients", get(clients::list))
        .route("/addclient", post(clients::create))
        .route("/editclient/:id", put(clients::update))
        .route("/deleteclient/:id", delete(clients::remove))
        // Invoices
        .route("/allinvoices", get(invoices::list))
        .route("/addinvoice", post(invoices::create))
        .route("/editinvoice/:id", put(invoices::update))
        .route("/deleteinvoice/:id", delete(invoices::remove))
        // Invoice items
        .route("/allinvoiceitems/:invoice_id", get(items::list))
        .route("/addinvoiceitem", post(items::create))
        .route("/editinvoiceitem/:id", put(items::update))
        .route("/deleteinvoiceitem/:id", delete(items::remove))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(db)
}
