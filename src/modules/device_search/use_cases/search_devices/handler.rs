// Search replaces the local result list with the devices matching a lookup key.
//
// Responsibilities
// - Trim the key; an empty key short-circuits before any remote call.
// - An unresolved scope matches nothing: the list is emptied without a remote call, and
//   searches already in flight are discarded when they complete.
// - Project every joined row; one bad row fails the whole search.
// - On failure keep the previous rows and record the error.

use crate::modules::device_search::controller::DeviceSearchController;
use crate::modules::device_search::core::scope::Scope;
use crate::modules::device_search::core::view_record::ViewRecord;
use crate::shared::core::errors::ControllerError;
use crate::shared::infrastructure::remote_store::RemoteStore;

impl<TStore> DeviceSearchController<TStore>
where
    TStore: RemoteStore + ?Sized,
{
    /// Returns the number of hits now listed.
    #[tracing::instrument(skip(self), fields(kind = %self.schema.primary_table))]
    pub async fn search(&self, lookup_key: &str, scope: Scope) -> Result<usize, ControllerError> {
        let lookup_key = lookup_key.trim();
        if lookup_key.is_empty() {
            tracing::debug!("empty lookup key, nothing to search");
            return Err(ControllerError::InvalidInput("lookup key is empty".into()));
        }
        let Scope::Store(store_id) = scope else {
            tracing::warn!("no store configured, search matches nothing");
            let mut state = self.state.write().await;
            state.rows.clear();
            state.error = None;
            state.last_key = Some(lookup_key.to_string());
            state.cleared_through = state.searches_started;
            return Ok(0);
        };

        let ticket = {
            let mut state = self.state.write().await;
            state.searches_in_flight += 1;
            state.searches_started += 1;
            state.searches_started
        };
        let result = self
            .store
            .select_joined(self.schema.query(store_id, lookup_key))
            .await
            .map_err(|e| ControllerError::read(&self.schema.primary_table, e))
            .and_then(|rows| {
                rows.iter()
                    .map(|row| self.schema.project(row))
                    .collect::<Result<Vec<ViewRecord>, _>>()
            });

        let mut state = self.state.write().await;
        state.searches_in_flight = state.searches_in_flight.saturating_sub(1);
        if ticket <= state.cleared_through {
            tracing::debug!("results discarded, the list was cleared meanwhile");
            return Ok(0);
        }
        match result {
            Ok(rows) => {
                let hits = rows.len();
                state.rows = rows;
                state.error = None;
                state.last_key = Some(lookup_key.to_string());
                tracing::info!(hits, "device search completed");
                Ok(hits)
            }
            Err(error) => {
                tracing::warn!(%error, "device search failed, previous results kept");
                state.error = Some(error.clone());
                Err(error)
            }
        }
    }
}
