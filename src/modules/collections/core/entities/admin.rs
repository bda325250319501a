use crate::modules::collections::core::item::CollectionItem;
use crate::modules::collections::core::status::AccountStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    pub admin_id: i64,
    pub name: String,
    pub email: String,
    pub status: AccountStatus,
}

impl CollectionItem for Admin {
    type Id = i64;
    type Status = AccountStatus;

    const KIND: &'static str = "admins";
    const ID_FIELD: &'static str = "admin_id";
    const STATUS_FIELD: &'static str = "status";
    const PROJECTION: &'static [&'static str] = &["admin_id", "name", "email", "status"];

    fn id(&self) -> &i64 {
        &self.admin_id
    }

    fn status(&self) -> &AccountStatus {
        &self.status
    }

    fn set_status(&mut self, status: AccountStatus) {
        self.status = status;
    }
}
