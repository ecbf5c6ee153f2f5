//! One-time schema creation. Table and column names are a durable
//! contract shared with other tools; do not rename them.

use sqlx::PgPool;

use crate::error::ApiError;

const CREATE_ISSUERS: &str = r#"
CREATE TABLE IF NOT EXISTS issuers (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    cui TEXT NOT NULL UNIQUE,
    nr_reg_com TEXT,
    address TEXT,
    bank_name TEXT,
    bank_account TEXT,
    phone TEXT,
    email TEXT,
    website TEXT
)
"#;

const CREATE_CLIENTS: &str = r#"
CREATE TABLE IF NOT EXISTS clients (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    cui TEXT,
    nr_reg_com TEXT,
    address TEXT,
    bank_name TEXT,
    bank_account TEXT,
    phone TEXT,
    email TEXT,
    website TEXT
)
"#;

const CREATE_INVOICES: &str = r#"
CREATE TABLE IF NOT EXISTS invoices (
    id_invoice TEXT PRIMARY KEY,
    id_issuer INTEGER REFERENCES issuers(id) ON DELETE CASCADE,
    id_client INTEGER REFERENCES clients(id),
    issued_date DATE,
    due_date DATE,
    lead_time INTEGER,
    subtotal NUMERIC(10,2) DEFAULT 0 CHECK (subtotal >= 0),
    total_vat NUMERIC(10,2) DEFAULT 0 CHECK (total_vat >= 0),
    grand_total NUMERIC(10,2) DEFAULT 0 CHECK (grand_total >= 0)
)
"#;

const CREATE_INVOICE_ITEMS: &str = r#"
CREATE TABLE IF NOT EXISTS invoice_items (
    id_item TEXT PRIMARY KEY,
    id_invoice TEXT REFERENCES invoices(id_invoice) ON DELETE CASCADE,
    item_description TEXT NOT NULL,
    item_qt INTEGER NOT NULL CHECK (item_qt > 0),
    item_price_without_vat NUMERIC(10,2) NOT NULL CHECK (item_price_without_vat >= 0),
    item_value NUMERIC(10,2) NOT NULL CHECK (item_value >= 0),
    item_vat_value NUMERIC(10,2) NOT NULL CHECK (item_vat_value >= 0)
)
"#;

/// Create the four tables inside a single transaction. Idempotent; on any
/// failure the transaction rolls back and the error propagates so startup
/// aborts rather than serving against an unverified schema.
pub async fn init_schema(pool: &PgPool) -> Result<(), ApiError> {
    let mut tx = pool.begin().await?;

    sqlx::query(CREATE_ISSUERS).execute(&mut *tx).await?;
    sqlx::query(CREATE_CLIENTS).execute(&mut *tx).await?;
    sqlx::query(CREATE_INVOICES).execute(&mut *tx).await?;
    sqlx::query(CREATE_INVOICE_ITEMS).execute(&mut *tx).await?;

    tx.commit().await?;

    tracing::info!("database schema initialized");

    Ok(())
}
