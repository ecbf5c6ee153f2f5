use serde::{Deserialize, Serialize};

/// A row in the `issuers` table. Name and CUI carry unique constraints.
#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
pub struct Issuer {
    pub id: i32,
    pub name: String,
    pub cui: String,
    pub nr_reg_com: Option<String>,
    pub address: Option<String>,
    pub bank_name: Option<String>,
    pub bank_account: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

/// Request body for creating or partially updating an issuer.
/// On update, absent fields keep their stored values.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct IssuerPayload {
    pub name: Option<String>,
    pub cui: Option<String>,
    pub nr_reg_com: Option<String>,
    pub address: Option<String>,
    pub bank_name: Option<String>,
    pub bank_account: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

impl IssuerPayload {
    /// Blank strings are treated as absent, so they become NULL on insert
    /// and keep the stored value on update.
    pub fn normalized(self) -> Self {
        Self {
            name: crate::validate::non_blank(self.name),
            cui: crate::validate::non_blank(self.cui),
            nr_reg_com: crate::validate::non_blank(self.nr_reg_com),
            address: crate::validate::non_blank(self.address),
            bank_name: crate::validate::non_blank(self.bank_name),
            bank_account: crate::validate::non_blank(self.bank_account),
            phone: crate::validate::non_blank(self.phone),
            email: crate::validate::non_blank(self.email),
            website: crate::validate::non_blank(self.website),
        }
    }
}
