use crate::modules::collections::core::item::{CollectionItem, TwoStateStatus};
use crate::modules::collections::use_cases::mutate_item::decision::PlannedWrite;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the user asked for. A toggle carries no value: the target is computed from the
/// item as it is when the confirmation resolves, never from what the dialog showed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum MutationIntent<S> {
    Remove,
    ToggleStatus,
    SetStatus(S),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationPrompt {
    pub kind: String,
    pub id: String,
    pub message: String,
}

impl ConfirmationPrompt {
    pub fn for_write<T: CollectionItem>(item: &T, write: &PlannedWrite<T::Status>) -> Self {
        let message = match write {
            PlannedWrite::Remove => format!("Delete {} {}?", T::KIND, item.id()),
            PlannedWrite::SetStatus { to, .. } => format!(
                "Set {} of {} {} to {}?",
                T::STATUS_FIELD,
                T::KIND,
                item.id(),
                to.label()
            ),
        };
        Self {
            kind: T::KIND.to_string(),
            id: item.id().to_string(),
            message,
        }
    }
}

impl fmt::Display for ConfirmationPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
