// Local-only edits of the search results. Nothing here reaches the remote store.

use crate::modules::device_search::controller::DeviceSearchController;
use crate::modules::device_search::core::view_record::ViewRecord;
use crate::shared::core::errors::ControllerError;
use crate::shared::infrastructure::remote_store::RemoteStore;

const RESULTS: &str = "search result";

impl<TStore> DeviceSearchController<TStore>
where
    TStore: RemoteStore + ?Sized,
{
    /// Flips the `returned` flag of the row at `index` and returns the new value.
    pub async fn toggle_returned(&self, index: usize) -> Result<bool, ControllerError> {
        let mut state = self.state.write().await;
        let row = state
            .rows
            .get_mut(index)
            .ok_or_else(|| ControllerError::not_found(RESULTS, index))?;
        row.returned = !row.returned;
        Ok(row.returned)
    }

    /// Drops the row at `index`; later rows shift up by one.
    pub async fn remove_row(&self, index: usize) -> Result<ViewRecord, ControllerError> {
        let mut state = self.state.write().await;
        if index >= state.rows.len() {
            return Err(ControllerError::not_found(RESULTS, index));
        }
        Ok(state.rows.remove(index))
    }
}
