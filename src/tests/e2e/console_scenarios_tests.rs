// End to end scenarios against the in memory remote store, one per documented console flow.

use crate::modules::collections::controller::CollectionController;
use crate::modules::collections::core::entities::Admin;
use crate::modules::collections::core::status::AccountStatus;
use crate::modules::collections::use_cases::mutate_item::command::MutationIntent;
use crate::modules::device_search::controller::DeviceSearchController;
use crate::modules::device_search::core::schema::DeviceJoinSchema;
use crate::modules::device_search::core::scope::Scope;
use crate::shared::core::errors::ControllerError;
use crate::shared::infrastructure::remote_store::in_memory::InMemoryRemoteStore;
use crate::tests::fixtures::records::admin;
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;

fn admins(rows: Vec<serde_json::Value>) -> Arc<InMemoryRemoteStore> {
    Arc::new(InMemoryRemoteStore::new().with_table("admins", "admin_id", rows))
}

#[rstest]
#[tokio::test]
async fn suspending_an_admin_patches_only_that_admin() {
    let store = admins(vec![
        json!({"admin_id": 1, "name": "Admin 1", "email": "admin1@example.com", "status": "active"}),
        json!({"admin_id": 2, "name": "Admin 2", "email": "admin2@example.com", "status": "active"}),
    ]);
    let controller = CollectionController::<_, Admin>::new(store);
    controller.load().await.expect("load failed");

    controller
        .request_mutation(&1, MutationIntent::ToggleStatus, |_| true)
        .await
        .expect("suspend failed");

    assert_eq!(
        controller.items().await,
        vec![
            admin(1, AccountStatus::Inactive),
            admin(2, AccountStatus::Active)
        ]
    );
}

#[rstest]
#[tokio::test]
async fn a_failed_delete_leaves_the_collection_and_allows_a_later_load() {
    let store = admins(vec![
        json!({"admin_id": 98, "name": "Admin 98", "email": "admin98@example.com", "status": "active"}),
        json!({"admin_id": 99, "name": "Admin 99", "email": "admin99@example.com", "status": "inactive"}),
    ]);
    let controller = CollectionController::<_, Admin>::new(store.clone());
    controller.load().await.expect("load failed");
    let before = controller.items().await;

    store.toggle_failing_writes();
    let result = controller
        .request_mutation(&99, MutationIntent::Remove, |_| true)
        .await;

    assert!(matches!(result, Err(ControllerError::RemoteWriteFailure { .. })));
    assert_eq!(controller.items().await, before);
    assert!(controller.error().await.is_some());

    assert_eq!(controller.load().await, Ok(2));
    assert_eq!(controller.error().await, None);
}

#[rstest]
#[tokio::test]
async fn a_device_hit_can_be_flagged_and_then_dropped() {
    let store = Arc::new(
        InMemoryRemoteStore::new()
            .with_table(
                "devices",
                "id",
                vec![json!({"id": 7, "imei": "DEV123", "store_id": 42, "product_id": 3, "sales_id": 9})],
            )
            .with_table("products", "id", vec![json!({"id": 3, "name": "Phone X"})])
            .with_table("sales", "id", vec![json!({"id": 9, "price": "12.5"})]),
    );
    let controller = DeviceSearchController::new(store.clone(), DeviceJoinSchema::default());

    assert_eq!(controller.search("DEV123", Scope::Store(42)).await, Ok(1));
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.rows.len(), 1);
    assert!(!snapshot.rows[0].returned);
    assert_eq!(snapshot.rows[0].amount_display(), "12.50");

    assert_eq!(controller.toggle_returned(0).await, Ok(true));
    controller.remove_row(0).await.expect("remove failed");
    assert!(controller.snapshot().await.rows.is_empty());

    // Annotations and removals never reach the store.
    assert_eq!(store.calls(), 1);
    assert_eq!(store.rows("devices").await.len(), 1);
}
