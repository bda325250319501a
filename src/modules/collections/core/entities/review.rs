use crate::modules::collections::core::item::CollectionItem;
use crate::modules::collections::core::status::Approval;
use crate::shared::core::primitives::OrderBy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub review_id: i64,
    pub user_id: i64,
    pub rating: u8,
    pub comment: String,
    pub is_approved: Approval,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl CollectionItem for Review {
    type Id = i64;
    type Status = Approval;

    const KIND: &'static str = "reviews";
    const ID_FIELD: &'static str = "review_id";
    const STATUS_FIELD: &'static str = "is_approved";
    const PROJECTION: &'static [&'static str] = &[
        "review_id",
        "user_id",
        "rating",
        "comment",
        "is_approved",
        "created_at",
    ];

    // Newest reviews first, the moderation queue reads top down.
    fn order_by() -> Option<OrderBy> {
        Some(OrderBy::descending("created_at"))
    }

    fn id(&self) -> &i64 {
        &self.review_id
    }

    fn status(&self) -> &Approval {
        &self.is_approved
    }

    fn set_status(&mut self, status: Approval) {
        self.is_approved = status;
    }
}
