mod issuer;
mod client;
mod invoice;
mod invoice_item;

pub use issuer::{Issuer, IssuerPayload};
pub use client::{Client, ClientPayload};
pub use invoice::{Invoice, InvoicePayload};
pub use invoice_item::{InvoiceItem, InvoiceItemPayload};
