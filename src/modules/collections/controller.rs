// Collection controller: owns one locally cached mirror of a remote table.
//
// Responsibilities
// - Hold the collection state behind a lock so that every operation reads the latest
//   confirmed state before acting.
// - Never hold the lock across a remote call.
//
// The operations themselves live next to their use case:
// - load_collection: `load`
// - mutate_item: `begin_mutation`, `commit`, `abort`, `request_mutation`
// - create_item: `create`

use crate::modules::collections::core::item::CollectionItem;
use crate::modules::collections::core::state::{CollectionSnapshot, CollectionState};
use crate::shared::core::errors::ControllerError;
use crate::shared::infrastructure::remote_store::{KeyFilter, RemoteStore};
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct CollectionController<TStore, TItem>
where
    TStore: RemoteStore + ?Sized,
    TItem: CollectionItem,
{
    pub(crate) store: Arc<TStore>,
    pub(crate) state: RwLock<CollectionState<TItem>>,
}

impl<TStore, TItem> CollectionController<TStore, TItem>
where
    TStore: RemoteStore + ?Sized,
    TItem: CollectionItem,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self {
            store,
            state: RwLock::new(CollectionState::default()),
        }
    }

    pub async fn snapshot(&self) -> CollectionSnapshot<TItem> {
        self.state.read().await.snapshot()
    }

    pub async fn items(&self) -> Vec<TItem> {
        self.state.read().await.items.clone()
    }

    pub async fn error(&self) -> Option<ControllerError> {
        self.state.read().await.error.clone()
    }

    pub(crate) fn key_of(id: &TItem::Id) -> Result<KeyFilter, ControllerError> {
        let value = serde_json::to_value(id).map_err(|e| {
            ControllerError::InvalidInput(format!("{} {id} is not a valid key: {e}", TItem::ID_FIELD))
        })?;
        Ok(KeyFilter::new(TItem::ID_FIELD, value))
    }
}
