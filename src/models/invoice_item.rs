use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A row in the `invoice_items` table. Deleting the parent invoice
/// cascades onto its items.
#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
pub struct InvoiceItem {
    pub id_item: String,
    pub id_invoice: Option<String>,
    pub item_description: String,
    pub item_qt: i32,
    pub item_price_without_vat: Decimal,
    pub item_value: Decimal,
    pub item_vat_value: Decimal,
}

/// Request body for creating or partially updating an invoice item.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct InvoiceItemPayload {
    pub id_item: Option<String>,
    pub id_invoice: Option<String>,
    pub item_description: Option<String>,
    pub item_qt: Option<i32>,
    pub item_price_without_vat: Option<Decimal>,
    pub item_value: Option<Decimal>,
    pub item_vat_value: Option<Decimal>,
}

impl InvoiceItemPayload {
    pub fn normalized(mut self) -> Self {
        self.id_item = crate::validate::non_blank(self.id_item.take());
        self.id_invoice = crate::validate::non_blank(self.id_invoice.take());
        self.item_description = crate::validate::non_blank(self.item_description.take());
        self
    }
}
