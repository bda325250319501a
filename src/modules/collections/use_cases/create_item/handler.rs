// Insert a new record remotely, then append the stored row to the local collection.
//
// Responsibilities
// - Refuse an id that is already present locally before any remote call.
// - Append what the store returned (it may have filled in the key), not the draft.

use crate::modules::collections::controller::CollectionController;
use crate::modules::collections::core::item::CollectionItem;
use crate::modules::collections::use_cases::load_collection::handler::decode_row;
use crate::shared::core::errors::ControllerError;
use crate::shared::infrastructure::remote_store::RemoteStore;
use serde_json::Value;

impl<TStore, TItem> CollectionController<TStore, TItem>
where
    TStore: RemoteStore + ?Sized,
    TItem: CollectionItem,
{
    #[tracing::instrument(skip(self, draft), fields(kind = TItem::KIND, id = %draft.id()))]
    pub async fn create(&self, draft: TItem) -> Result<TItem, ControllerError> {
        let duplicate = self.state.read().await.get(draft.id()).is_some();
        if duplicate {
            let error = ControllerError::InvalidInput(format!(
                "{} {} already exists",
                TItem::ID_FIELD,
                draft.id()
            ));
            tracing::warn!(%error, "create rejected");
            return Err(error);
        }

        let row = match serde_json::to_value(&draft) {
            Ok(Value::Object(row)) => row,
            Ok(_) => {
                return Err(ControllerError::InvalidInput(format!(
                    "{} does not serialize to a row",
                    TItem::KIND
                )));
            }
            Err(e) => return Err(ControllerError::InvalidInput(e.to_string())),
        };

        let stored = self
            .store
            .insert(TItem::KIND, row)
            .await
            .map_err(|e| ControllerError::write(TItem::KIND, draft.id(), e))
            .and_then(decode_row::<TItem>);

        let mut state = self.state.write().await;
        match stored {
            Ok(item) if state.get(item.id()).is_some() => {
                // A load that completed meanwhile already brought the row in.
                state.error = None;
                Ok(item)
            }
            Ok(item) => {
                state.items.push(item.clone());
                state.error = None;
                tracing::info!("item created");
                Ok(item)
            }
            Err(error) => {
                tracing::warn!(%error, "create failed");
                state.error = Some(error.clone());
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod collection_create_item_tests {
    use crate::modules::collections::controller::CollectionController;
    use crate::modules::collections::core::entities::User;
    use crate::modules::collections::core::status::AccountStatus;
    use crate::shared::core::errors::ControllerError;
    use crate::shared::infrastructure::remote_store::in_memory::InMemoryRemoteStore;
    use crate::tests::fixtures::records::{seeded_store, user};
    use rstest::{fixture, rstest};
    use std::sync::Arc;

    #[fixture]
    async fn before_each() -> (Arc<InMemoryRemoteStore>, CollectionController<InMemoryRemoteStore, User>) {
        let store = Arc::new(seeded_store());
        let controller = CollectionController::new(store.clone());
        controller.load().await.expect("load failed");
        (store, controller)
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_append_the_stored_row(
        #[future] before_each: (Arc<InMemoryRemoteStore>, CollectionController<InMemoryRemoteStore, User>),
    ) {
        let (store, controller) = before_each.await;
        let created = controller
            .create(user(10, AccountStatus::Active))
            .await
            .expect("create failed");

        assert_eq!(created, user(10, AccountStatus::Active));
        let items = controller.items().await;
        assert_eq!(items.last(), Some(&created));
        assert_eq!(store.rows("users").await.len(), items.len());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_refuse_an_id_that_is_already_listed(
        #[future] before_each: (Arc<InMemoryRemoteStore>, CollectionController<InMemoryRemoteStore, User>),
    ) {
        let (store, controller) = before_each.await;
        let calls = store.calls();
        let result = controller.create(user(1, AccountStatus::Active)).await;
        assert_eq!(
            result,
            Err(ControllerError::InvalidInput("user_id 1 already exists".into()))
        );
        assert_eq!(store.calls(), calls);
        assert_eq!(controller.error().await, None);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_leave_the_collection_untouched_when_the_insert_fails(
        #[future] before_each: (Arc<InMemoryRemoteStore>, CollectionController<InMemoryRemoteStore, User>),
    ) {
        let (store, controller) = before_each.await;
        let before = controller.items().await;
        store.toggle_failing_writes();

        let result = controller.create(user(10, AccountStatus::Active)).await;
        assert!(matches!(result, Err(ControllerError::RemoteWriteFailure { .. })));
        assert_eq!(controller.items().await, before);
        assert!(controller.error().await.is_some());
    }
}
