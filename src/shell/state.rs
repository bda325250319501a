use crate::modules::collections::controller::CollectionController;
use crate::modules::collections::core::entities::{Admin, Review, User};
use crate::modules::device_search::controller::DeviceSearchController;
use crate::modules::device_search::core::scope::Scope;
use crate::shell::config::ConsoleConfig;
use crate::shared::infrastructure::remote_store::RemoteStore;
use std::sync::Arc;

pub type Store = dyn RemoteStore;

#[derive(Clone)]
pub struct AppState {
    pub admins: Arc<CollectionController<Store, Admin>>,
    pub users: Arc<CollectionController<Store, User>>,
    pub reviews: Arc<CollectionController<Store, Review>>,
    pub device_search: Arc<DeviceSearchController<Store>>,
    pub scope: Scope,
}

impl AppState {
    pub fn new(store: Arc<Store>, config: &ConsoleConfig) -> Self {
        Self {
            admins: Arc::new(CollectionController::new(store.clone())),
            users: Arc::new(CollectionController::new(store.clone())),
            reviews: Arc::new(CollectionController::new(store.clone())),
            device_search: Arc::new(DeviceSearchController::new(
                store,
                config.join_schema.clone(),
            )),
            scope: config.scope,
        }
    }
}
