//! Invoicing data-management backend: CRUD HTTP endpoints over issuers,
//! clients, invoices and invoice items, backed by PostgreSQL.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod validate;
