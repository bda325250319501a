// Device search controller: scoped lookup over devices joined with their sale and
// product, plus local-only annotations on the hits.
//
// The operations live next to their use case:
// - search_devices: `search`
// - annotate_results: `toggle_returned`, `remove_row`

use crate::modules::device_search::core::schema::DeviceJoinSchema;
use crate::modules::device_search::core::state::{SearchSnapshot, SearchState};
use crate::shared::infrastructure::remote_store::RemoteStore;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct DeviceSearchController<TStore>
where
    TStore: RemoteStore + ?Sized,
{
    pub(crate) store: Arc<TStore>,
    pub(crate) schema: DeviceJoinSchema,
    pub(crate) state: RwLock<SearchState>,
}

impl<TStore> DeviceSearchController<TStore>
where
    TStore: RemoteStore + ?Sized,
{
    pub fn new(store: Arc<TStore>, schema: DeviceJoinSchema) -> Self {
        Self {
            store,
            schema,
            state: RwLock::new(SearchState::default()),
        }
    }

    pub async fn snapshot(&self) -> SearchSnapshot {
        self.state.read().await.snapshot()
    }
}
