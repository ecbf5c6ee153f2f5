pub mod schema;

use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{
    Client, ClientPayload, Invoice, InvoiceItem, InvoiceItemPayload, InvoicePayload, Issuer,
    IssuerPayload,
};
use crate::validate;

/// Database connection pool plus every repository operation.
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new Database instance with a bounded connection pool.
    pub async fn new(config: &Config) -> Result<Self, ApiError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(config.database_url())
            .await?;

        Ok(Self { pool })
    }

    /// Wrap an already-constructed pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    // Issuer operations

    pub async fn list_issuers(&self) -> Result<Vec<Issuer>, ApiError> {
        let issuers = sqlx::query_as::<_, Issuer>("SELECT * FROM issuers")
            .fetch_all(self.get_pool())
            .await?;

        Ok(issuers)
    }

    pub async fn create_issuer(&self, payload: IssuerPayload) -> Result<Issuer, ApiError> {
        let payload = payload.normalized();
        validate::require(&[
            ("name", payload.name.is_some()),
            ("cui", payload.cui.is_some()),
        ])?;

        let issuer = sqlx::query_as::<_, Issuer>(
            r#"
            INSERT INTO issuers
                (name, cui, nr_reg_com, address, bank_name, bank_account, phone, email, website)
            VALUES
                ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.cui)
        .bind(&payload.nr_reg_com)
        .bind(&payload.address)
        .bind(&payload.bank_name)
        .bind(&payload.bank_account)
        .bind(&payload.phone)
        .bind(&payload.email)
        .bind(&payload.website)
        .fetch_one(self.get_pool())
        .await
        .map_err(|err| {
            ApiError::classify_write(
                err,
                "Issuer with this name or CUI already exists.",
                "Issuer references a nonexistent entity.",
            )
        })?;

        Ok(issuer)
    }

    pub async fn update_issuer(&self, id: i32, payload: IssuerPayload) -> Result<Issuer, ApiError> {
        let payload = payload.normalized();

        self.get_issuer(id).await?;

        let issuer = sqlx::query_as::<_, Issuer>(
            r#"
            UPDATE issuers
            SET
                name = COALESCE($1, name),
                cui = COALESCE($2, cui),
                nr_reg_com = COALESCE($3, nr_reg_com),
                address = COALESCE($4, address),
                bank_name = COALESCE($5, bank_name),
                bank_account = COALESCE($6, bank_account),
                phone = COALESCE($7, phone),
                email = COALESCE($8, email),
                website = COALESCE($9, website)
            WHERE id = $10
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.cui)
        .bind(&payload.nr_reg_com)
        .bind(&payload.address)
        .bind(&payload.bank_name)
        .bind(&payload.bank_account)
        .bind(&payload.phone)
        .bind(&payload.email)
        .bind(&payload.website)
        .bind(id)
        .fetch_one(self.get_pool())
        .await
        .map_err(|err| {
            ApiError::classify_write(
                err,
                "Issuer with this name or CUI already exists.",
                "Issuer references a nonexistent entity.",
            )
        })?;

        Ok(issuer)
    }

    pub async fn delete_issuer(&self, id: i32) -> Result<Issuer, ApiError> {
        self.get_issuer(id).await?;

        // Invoices for this issuer, and their items, go with it (FK cascade).
        let issuer = sqlx::query_as::<_, Issuer>("DELETE FROM issuers WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_one(self.get_pool())
            .await?;

        Ok(issuer)
    }

    async fn get_issuer(&self, id: i32) -> Result<Issuer, ApiError> {
        sqlx::query_as::<_, Issuer>("SELECT * FROM issuers WHERE id = $1")
            .bind(id)
            .fetch_optional(self.get_pool())
            .await?
            .ok_or_else(|| ApiError::NotFound("Issuer not found.".to_owned()))
    }

    // Client operations

    pub async fn list_clients(&self) -> Result<Vec<Client>, ApiError> {
        let clients = sqlx::query_as::<_, Client>("SELECT * FROM clients")
            .fetch_all(self.get_pool())
            .await?;

        Ok(clients)
    }

    pub async fn create_client(&self, payload: ClientPayload) -> Result<Client, ApiError> {
        let payload = payload.normalized();
        validate::require(&[
            ("name", payload.name.is_some()),
            ("cui", payload.cui.is_some()),
        ])?;

        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients
                (name, cui, nr_reg_com, address, bank_name, bank_account, phone, email, website)
            VALUES
                ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.cui)
        .bind(&payload.nr_reg_com)
        .bind(&payload.address)
        .bind(&payload.bank_name)
        .bind(&payload.bank_account)
        .bind(&payload.phone)
        .bind(&payload.email)
        .bind(&payload.website)
        .fetch_one(self.get_pool())
        .await
        .map_err(|err| {
            ApiError::classify_write(
                err,
                "Client with this name or CUI already exists.",
                "Client references a nonexistent entity.",
            )
        })?;

        Ok(client)
    }

    pub async fn update_client(&self, id: i32, payload: ClientPayload) -> Result<Client, ApiError> {
        let payload = payload.normalized();

        self.get_client(id).await?;

        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET
                name = COALESCE($1, name),
                cui = COALESCE($2, cui),
                nr_reg_com = COALESCE($3, nr_reg_com),
                address = COALESCE($4, address),
                bank_name = COALESCE($5, bank_name),
                bank_account = COALESCE($6, bank_account),
                phone = COALESCE($7, phone),
                email = COALESCE($8, email),
                website = COALESCE($9, website)
            WHERE id = $10
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.cui)
        .bind(&payload.nr_reg_com)
        .bind(&payload.address)
        .bind(&payload.bank_name)
        .bind(&payload.bank_account)
        .bind(&payload.phone)
        .bind(&payload.email)
        .bind(&payload.website)
        .bind(id)
        .fetch_one(self.get_pool())
        .await?;

        Ok(client)
    }

    pub async fn delete_client(&self, id: i32) -> Result<Client, ApiError> {
        self.get_client(id).await?;

        // No cascade on invoices.id_client: deleting a client that is still
        // referenced by an invoice fails at the foreign key.
        let client = sqlx::query_as::<_, Client>("DELETE FROM clients WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_one(self.get_pool())
            .await?;

        Ok(client)
    }

    async fn get_client(&self, id: i32) -> Result<Client, ApiError> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(self.get_pool())
            .await?
            .ok_or_else(|| ApiError::NotFound("Client not found.".to_owned()))
    }

    // Invoice operations

    pub async fn list_invoices(&self) -> Result<Vec<Invoice>, ApiError> {
        let invoices = sqlx::query_as::<_, Invoice>("SELECT * FROM invoices")
            .fetch_all(self.get_pool())
            .await?;

        Ok(invoices)
    }

    pub async fn create_invoice(&self, payload: InvoicePayload) -> Result<Invoice, ApiError> {
        let payload = payload.normalized();
        validate::require(&[
            ("id_invoice", payload.id_invoice.is_some()),
            ("id_issuer", payload.id_issuer.is_some()),
            ("id_client", payload.id_client.is_some()),
        ])?;
        check_non_negative(&[
            ("subtotal", payload.subtotal),
            ("total_vat", payload.total_vat),
            ("grand_total", payload.grand_total),
        ])?;

        // Reject dangling references up front; a racing delete still gets
        // caught by the foreign key and classified the same way.
        if !self.issuer_exists(payload.id_issuer.unwrap_or_default()).await? {
            return Err(ApiError::Validation(
                "Referenced issuer does not exist.".to_owned(),
            ));
        }
        if !self.client_exists(payload.id_client.unwrap_or_default()).await? {
            return Err(ApiError::Validation(
                "Referenced client does not exist.".to_owned(),
            ));
        }

        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices
                (id_invoice, id_issuer, id_client, issued_date, due_date, lead_time,
                 subtotal, total_vat, grand_total)
            VALUES
                ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&payload.id_invoice)
        .bind(payload.id_issuer)
        .bind(payload.id_client)
        .bind(payload.issued_date)
        .bind(payload.due_date)
        .bind(payload.lead_time)
        .bind(payload.subtotal.unwrap_or(Decimal::ZERO))
        .bind(payload.total_vat.unwrap_or(Decimal::ZERO))
        .bind(payload.grand_total.unwrap_or(Decimal::ZERO))
        .fetch_one(self.get_pool())
        .await
        .map_err(|err| {
            ApiError::classify_write(
                err,
                "Invoice with this id already exists.",
                "Referenced issuer or client does not exist.",
            )
        })?;

        Ok(invoice)
    }

    pub async fn update_invoice(&self, id: &str, payload: InvoicePayload) -> Result<Invoice, ApiError> {
        let payload = payload.normalized();
        check_non_negative(&[
            ("subtotal", payload.subtotal),
            ("total_vat", payload.total_vat),
            ("grand_total", payload.grand_total),
        ])?;

        self.get_invoice(id).await?;

        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices
            SET
                id_issuer = COALESCE($1, id_issuer),
                id_client = COALESCE($2, id_client),
                issued_date = COALESCE($3, issued_date),
                due_date = COALESCE($4, due_date),
                lead_time = COALESCE($5, lead_time),
                subtotal = COALESCE($6, subtotal),
                total_vat = COALESCE($7, total_vat),
                grand_total = COALESCE($8, grand_total)
            WHERE id_invoice = $9
            RETURNING *
            "#,
        )
        .bind(payload.id_issuer)
        .bind(payload.id_client)
        .bind(payload.issued_date)
        .bind(payload.due_date)
        .bind(payload.lead_time)
        .bind(payload.subtotal)
        .bind(payload.total_vat)
        .bind(payload.grand_total)
        .bind(id)
        .fetch_one(self.get_pool())
        .await
        .map_err(|err| {
            ApiError::classify_write(
                err,
                "Invoice with this id already exists.",
                "Referenced issuer or client does not exist.",
            )
        })?;

        Ok(invoice)
    }

    pub async fn delete_invoice(&self, id: &str) -> Result<Invoice, ApiError> {
        self.get_invoice(id).await?;

        // Items for this invoice go with it (FK cascade).
        let invoice =
            sqlx::query_as::<_, Invoice>("DELETE FROM invoices WHERE id_invoice = $1 RETURNING *")
                .bind(id)
                .fetch_one(self.get_pool())
                .await?;

        Ok(invoice)
    }

    async fn get_invoice(&self, id: &str) -> Result<Invoice, ApiError> {
        sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id_invoice = $1")
            .bind(id)
            .fetch_optional(self.get_pool())
            .await?
            .ok_or_else(|| ApiError::NotFound("Invoice not found.".to_owned()))
    }

    async fn issuer_exists(&self, id: i32) -> Result<bool, ApiError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM issuers WHERE id = $1)")
            .bind(id)
            .fetch_one(self.get_pool())
            .await?;

        Ok(exists)
    }

    async fn client_exists(&self, id: i32) -> Result<bool, ApiError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM clients WHERE id = $1)")
            .bind(id)
            .fetch_one(self.get_pool())
            .await?;

        Ok(exists)
    }

    // Invoice item operations

    pub async fn list_invoice_items(&self, invoice_id: &str) -> Result<Vec<InvoiceItem>, ApiError> {
        let items =
            sqlx::query_as::<_, InvoiceItem>("SELECT * FROM invoice_items WHERE id_invoice = $1")
                .bind(invoice_id)
                .fetch_all(self.get_pool())
                .await?;

        Ok(items)
    }

    pub async fn create_invoice_item(
        &self,
        payload: InvoiceItemPayload,
    ) -> Result<InvoiceItem, ApiError> {
        let payload = payload.normalized();
        validate::require(&[
            ("id_item", payload.id_item.is_some()),
            ("id_invoice", payload.id_invoice.is_some()),
            ("item_description", payload.item_description.is_some()),
            ("item_qt", payload.item_qt.is_some()),
            (
                "item_price_without_vat",
                payload.item_price_without_vat.is_some(),
            ),
            ("item_value", payload.item_value.is_some()),
            ("item_vat_value", payload.item_vat_value.is_some()),
        ])?;
        check_positive_quantity(payload.item_qt)?;
        check_non_negative(&[
            ("item_price_without_vat", payload.item_price_without_vat),
            ("item_value", payload.item_value),
            ("item_vat_value", payload.item_vat_value),
        ])?;

        let item = sqlx::query_as::<_, InvoiceItem>(
            r#"
            INSERT INTO invoice_items
                (id_item, id_invoice, item_description, item_qt,
                 item_price_without_vat, item_value, item_vat_value)
            VALUES
                ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&payload.id_item)
        .bind(&payload.id_invoice)
        .bind(&payload.item_description)
        .bind(payload.item_qt)
        .bind(payload.item_price_without_vat)
        .bind(payload.item_value)
        .bind(payload.item_vat_value)
        .fetch_one(self.get_pool())
        .await
        .map_err(|err| {
            ApiError::classify_write(
                err,
                "Invoice item with this id already exists.",
                "Referenced invoice does not exist.",
            )
        })?;

        Ok(item)
    }

    pub async fn update_invoice_item(
        &self,
        id: &str,
        payload: InvoiceItemPayload,
    ) -> Result<InvoiceItem, ApiError> {
        let payload = payload.normalized();
        check_positive_quantity(payload.item_qt)?;
        check_non_negative(&[
            ("item_price_without_vat", payload.item_price_without_vat),
            ("item_value", payload.item_value),
            ("item_vat_value", payload.item_vat_value),
        ])?;

        self.get_invoice_item(id).await?;

        let item = sqlx::query_as::<_, InvoiceItem>(
            r#"
            UPDATE invoice_items
            SET
                id_invoice = COALESCE($1, id_invoice),
                item_description = COALESCE($2, item_description),
                item_qt = COALESCE($3, item_qt),
                item_price_without_vat = COALESCE($4, item_price_without_vat),
                item_value = COALESCE($5, item_value),
                item_vat_value = COALESCE($6, item_vat_value)
            WHERE id_item = $7
            RETURNING *
            "#,
        )
        .bind(&payload.id_invoice)
        .bind(&payload.item_description)
        .bind(payload.item_qt)
        .bind(payload.item_price_without_vat)
        .bind(payload.item_value)
        .bind(payload.item_vat_value)
        .bind(id)
        .fetch_one(self.get_pool())
        .await
        .map_err(|err| {
            ApiError::classify_write(
                err,
                "Invoice item with this id already exists.",
                "Referenced invoice does not exist.",
            )
        })?;

        Ok(item)
    }

    pub async fn delete_invoice_item(&self, id: &str) -> Result<InvoiceItem, ApiError> {
        self.get_invoice_item(id).await?;

        let item = sqlx::query_as::<_, InvoiceItem>(
            "DELETE FROM invoice_items WHERE id_item = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(self.get_pool())
        .await?;

        Ok(item)
    }

    async fn get_invoice_item(&self, id: &str) -> Result<InvoiceItem, ApiError> {
        sqlx::query_as::<_, InvoiceItem>("SELECT * FROM invoice_items WHERE id_item = $1")
            .bind(id)
            .fetch_optional(self.get_pool())
            .await?
            .ok_or_else(|| ApiError::NotFound("Invoice item not found.".to_owned()))
    }
}

fn check_positive_quantity(qt: Option<i32>) -> Result<(), ApiError> {
    match qt {
        Some(q) if q < 1 => Err(ApiError::Validation(
            "item_qt must be a positive integer.".to_owned(),
        )),
        _ => Ok(()),
    }
}

fn check_non_negative(fields: &[(&str, Option<Decimal>)]) -> Result<(), ApiError> {
    for (name, value) in fields {
        if value.is_some_and(|d| d.is_sign_negative() && !d.is_zero()) {
            return Err(ApiError::Validation(format!("{name} must not be negative.")));
        }
    }
    Ok(())
}

/// Initialize the database: build the pool and ensure the schema exists.
/// A schema failure is fatal; the caller must not start serving.
pub async fn init(config: &Config) -> Result<Database, ApiError> {
    let db = Database::new(config).await?;

    schema::init_schema(db.get_pool()).await?;

    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn zero_quantity_is_rejected() {
        assert!(check_positive_quantity(Some(0)).is_err());
        assert!(check_positive_quantity(Some(-3)).is_err());
        assert!(check_positive_quantity(Some(1)).is_ok());
        assert!(check_positive_quantity(None).is_ok());
    }

    #[test]
    fn negative_amounts_are_rejected_by_name() {
        let err = check_non_negative(&[
            ("subtotal", Some(Decimal::new(100, 2))),
            ("total_vat", Some(Decimal::new(-1, 2))),
        ])
        .unwrap_err();

        match err {
            ApiError::Validation(msg) => assert_eq!(msg, "total_vat must not be negative."),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn zero_amounts_are_fine() {
        assert!(check_non_negative(&[("subtotal", Some(Decimal::ZERO))]).is_ok());
        assert!(check_non_negative(&[("subtotal", None)]).is_ok());
    }
}
