use crate::modules::collections::core::item::TwoStateStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl TwoStateStatus for AccountStatus {
    const OPTIONS: [Self; 2] = [AccountStatus::Active, AccountStatus::Inactive];

    fn complement(&self) -> Self {
        match self {
            AccountStatus::Active => AccountStatus::Inactive,
            AccountStatus::Inactive => AccountStatus::Active,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Inactive => "inactive",
        }
    }
}

/// Moderation flag stored as a plain boolean column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Approval(pub bool);

impl TwoStateStatus for Approval {
    const OPTIONS: [Self; 2] = [Approval(true), Approval(false)];

    fn complement(&self) -> Self {
        Approval(!self.0)
    }

    fn label(&self) -> &'static str {
        if self.0 { "approved" } else { "not approved" }
    }
}
