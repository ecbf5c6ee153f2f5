use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A row in the `invoices` table. The id is supplied by the caller, not
/// generated. Deleting the referenced issuer cascades onto this row.
#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
pub struct Invoice {
    pub id_invoice: String,
    pub id_issuer: Option<i32>,
    pub id_client: Option<i32>,
    pub issued_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub lead_time: Option<i32>,
    pub subtotal: Option<Decimal>,
    pub total_vat: Option<Decimal>,
    pub grand_total: Option<Decimal>,
}

/// Request body for creating or partially updating an invoice.
/// `id_invoice` is only read on create; on update the path parameter
/// identifies the row and the field is ignored, since ids are not
/// renameable.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct InvoicePayload {
    pub id_invoice: Option<String>,
    pub id_issuer: Option<i32>,
    pub id_client: Option<i32>,
    pub issued_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub lead_time: Option<i32>,
    pub subtotal: Option<Decimal>,
    pub total_vat: Option<Decimal>,
    pub grand_total: Option<Decimal>,
}

impl InvoicePayload {
    pub fn normalized(mut self) -> Self {
        self.id_invoice = crate::validate::non_blank(self.id_invoice.take());
        self
    }
}
