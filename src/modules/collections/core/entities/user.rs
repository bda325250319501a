use crate::modules::collections::core::item::CollectionItem;
use crate::modules::collections::core::status::AccountStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub status: AccountStatus,
}

impl CollectionItem for User {
    type Id = i64;
    type Status = AccountStatus;

    const KIND: &'static str = "users";
    const ID_FIELD: &'static str = "user_id";
    const STATUS_FIELD: &'static str = "status";
    const PROJECTION: &'static [&'static str] = &["user_id", "full_name", "email", "phone", "status"];

    fn id(&self) -> &i64 {
        &self.user_id
    }

    fn status(&self) -> &AccountStatus {
        &self.status
    }

    fn set_status(&mut self, status: AccountStatus) {
        self.status = status;
    }
}
