use crate::modules::collections::core::item::CollectionItem;
use crate::modules::collections::use_cases::mutate_item::command::MutationIntent;
use crate::shared::core::errors::ControllerError;
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// Per item lifecycle: `Idle -> ConfirmPending -> (Idle | Committing) -> Idle`.
/// Only non idle items are tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemPhase {
    Idle,
    ConfirmPending,
    Committing,
}

#[derive(Debug, Clone)]
pub struct PendingMutation<T: CollectionItem> {
    pub id: T::Id,
    pub intent: MutationIntent<T::Status>,
    /// Value of `CollectionState::load_generation` when the confirmation was opened.
    pub generation: u64,
}

#[derive(Debug)]
pub struct CollectionState<T: CollectionItem> {
    pub items: Vec<T>,
    pub error: Option<ControllerError>,
    pub loaded: bool,
    pub loads_in_flight: usize,
    /// Bumped whenever a load starts.
    pub load_generation: u64,
    pub phases: HashMap<T::Id, ItemPhase>,
    pub pending: HashMap<Uuid, PendingMutation<T>>,
}

impl<T: CollectionItem> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            error: None,
            loaded: false,
            loads_in_flight: 0,
            load_generation: 0,
            phases: HashMap::new(),
            pending: HashMap::new(),
        }
    }
}

impl<T: CollectionItem> CollectionState<T> {
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn phase(&self, id: &T::Id) -> ItemPhase {
        self.phases.get(id).copied().unwrap_or(ItemPhase::Idle)
    }

    pub fn settle(&mut self, id: &T::Id) {
        self.phases.remove(id);
    }

    /// Drops confirmations opened before the load `generation` started, and any whose item
    /// is gone. Items still committing keep their phase; the commit settles them.
    pub fn release_confirmations_before(&mut self, generation: u64) {
        let items = &self.items;
        self.pending.retain(|_, pending| {
            pending.generation >= generation && items.iter().any(|item| item.id() == &pending.id)
        });
        let pending = &self.pending;
        self.phases.retain(|id, phase| match phase {
            ItemPhase::Committing => true,
            _ => pending.values().any(|p| &p.id == id),
        });
    }

    pub fn snapshot(&self) -> CollectionSnapshot<T> {
        CollectionSnapshot {
            items: self.items.clone(),
            error: self.error.clone(),
            loaded: self.loaded,
            loading: self.loads_in_flight > 0,
            busy: self
                .phases
                .iter()
                .map(|(id, phase)| (id.clone(), *phase))
                .collect(),
        }
    }
}

/// What a view renders. `loaded == false` with an error means the first load failed,
/// an empty `items` with `error == None` means the collection is really empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSnapshot<T: CollectionItem> {
    pub items: Vec<T>,
    pub error: Option<ControllerError>,
    pub loaded: bool,
    pub loading: bool,
    pub busy: Vec<(T::Id, ItemPhase)>,
}

impl<T: CollectionItem> CollectionSnapshot<T> {
    pub fn phase(&self, id: &T::Id) -> ItemPhase {
        self.busy
            .iter()
            .find(|(busy_id, _)| busy_id == id)
            .map(|(_, phase)| *phase)
            .unwrap_or(ItemPhase::Idle)
    }
}

#[cfg(test)]
mod collection_state_tests {
    use super::*;
    use crate::modules::collections::core::entities::Admin;
    use crate::modules::collections::core::status::AccountStatus;
    use crate::tests::fixtures::records::admin;
    use rstest::rstest;

    #[rstest]
    fn it_should_create_the_blank_state() {
        let state = CollectionState::<Admin>::default();
        let snapshot = state.snapshot();
        assert!(snapshot.items.is_empty());
        assert!(!snapshot.loaded);
        assert!(!snapshot.loading);
        assert_eq!(snapshot.error, None);
    }

    #[rstest]
    fn it_should_report_idle_for_untracked_items() {
        let mut state = CollectionState::<Admin>::default();
        state.items.push(admin(1, AccountStatus::Active));
        state.phases.insert(2, ItemPhase::Committing);

        assert_eq!(state.phase(&1), ItemPhase::Idle);
        assert_eq!(state.phase(&2), ItemPhase::Committing);
        assert_eq!(state.snapshot().phase(&2), ItemPhase::Committing);

        state.settle(&2);
        assert_eq!(state.phase(&2), ItemPhase::Idle);
    }

    fn open(state: &mut CollectionState<Admin>, id: i64, generation: u64) -> Uuid {
        let token = Uuid::now_v7();
        state.phases.insert(id, ItemPhase::ConfirmPending);
        state.pending.insert(
            token,
            PendingMutation {
                id,
                intent: MutationIntent::Remove,
                generation,
            },
        );
        token
    }

    #[rstest]
    fn it_should_release_confirmations_older_than_the_load() {
        let mut state = CollectionState::<Admin>::default();
        state.items = vec![admin(1, AccountStatus::Active), admin(2, AccountStatus::Active)];
        open(&mut state, 1, 0);
        let fresh = open(&mut state, 2, 1);
        state.phases.insert(3, ItemPhase::Committing);

        state.release_confirmations_before(1);

        assert_eq!(state.phase(&1), ItemPhase::Idle);
        assert_eq!(state.phase(&2), ItemPhase::ConfirmPending);
        assert_eq!(state.phase(&3), ItemPhase::Committing);
        assert_eq!(state.pending.keys().collect::<Vec<_>>(), vec![&fresh]);
    }

    #[rstest]
    fn it_should_release_confirmations_for_items_that_are_gone() {
        let mut state = CollectionState::<Admin>::default();
        state.items = vec![admin(1, AccountStatus::Active)];
        open(&mut state, 1, 4);
        open(&mut state, 9, 4);

        state.release_confirmations_before(4);

        assert_eq!(state.pending.len(), 1);
        assert_eq!(state.phase(&9), ItemPhase::Idle);
        assert!(!state.phases.contains_key(&9));
    }
}
