use crate::modules::collections::core::item::{CollectionItem, TwoStateStatus};
use crate::modules::collections::use_cases::mutate_item::command::MutationIntent;
use crate::modules::collections::use_cases::mutate_item::decision::PlannedWrite;

pub fn decide_mutation<T: CollectionItem>(
    item: &T,
    intent: &MutationIntent<T::Status>,
) -> PlannedWrite<T::Status> {
    match intent {
        MutationIntent::Remove => PlannedWrite::Remove,
        MutationIntent::ToggleStatus => PlannedWrite::SetStatus {
            from: item.status().clone(),
            to: item.status().complement(),
        },
        MutationIntent::SetStatus(value) => PlannedWrite::SetStatus {
            from: item.status().clone(),
            to: value.clone(),
        },
    }
}

/// Patches the local collection after the remote write succeeded. Returns the affected
/// item as it is now (or as it was, for a removal); `None` if the id is no longer present.
pub fn apply_write<T: CollectionItem>(
    items: &mut Vec<T>,
    id: &T::Id,
    write: &PlannedWrite<T::Status>,
) -> Option<T> {
    let index = items.iter().position(|item| item.id() == id)?;
    match write {
        PlannedWrite::Remove => Some(items.remove(index)),
        PlannedWrite::SetStatus { to, .. } => {
            let item = &mut items[index];
            item.set_status(to.clone());
            Some(item.clone())
        }
    }
}
