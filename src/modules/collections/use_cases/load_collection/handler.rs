// Load replaces the whole local collection with what the remote store returns.
//
// Responsibilities
// - Read the entity kind with its fixed projection and optional ordering.
// - Decode every row; a malformed row or a duplicate id fails the whole load.
// - On failure keep the previous collection and record the error.
// - Concurrent loads do not interleave their results: the last one to complete wins.

use crate::modules::collections::controller::CollectionController;
use crate::modules::collections::core::item::CollectionItem;
use crate::shared::core::errors::ControllerError;
use crate::shared::core::primitives::Row;
use crate::shared::infrastructure::remote_store::{RemoteStore, SelectQuery};
use serde_json::Value;
use std::collections::HashSet;

pub(crate) fn decode_row<T: CollectionItem>(row: Row) -> Result<T, ControllerError> {
    serde_json::from_value(Value::Object(row))
        .map_err(|e| ControllerError::read(T::KIND, format!("malformed row: {e}")))
}

fn decode_rows<T: CollectionItem>(rows: Vec<Row>) -> Result<Vec<T>, ControllerError> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .map(|row| {
            let item = decode_row::<T>(row)?;
            if !seen.insert(item.id().clone()) {
                return Err(ControllerError::read(
                    T::KIND,
                    format!("duplicate {} {}", T::ID_FIELD, item.id()),
                ));
            }
            Ok(item)
        })
        .collect()
}

impl<TStore, TItem> CollectionController<TStore, TItem>
where
    TStore: RemoteStore + ?Sized,
    TItem: CollectionItem,
{
    #[tracing::instrument(skip(self), fields(kind = TItem::KIND))]
    pub async fn load(&self) -> Result<usize, ControllerError> {
        let generation = {
            let mut state = self.state.write().await;
            state.loads_in_flight += 1;
            state.load_generation += 1;
            state.load_generation
        };

        let query = SelectQuery {
            table: TItem::KIND.to_string(),
            columns: TItem::PROJECTION.iter().map(|c| c.to_string()).collect(),
            order_by: TItem::order_by(),
        };
        let result = self
            .store
            .select(query)
            .await
            .map_err(|e| ControllerError::read(TItem::KIND, e))
            .and_then(decode_rows::<TItem>);

        let mut state = self.state.write().await;
        state.loads_in_flight = state.loads_in_flight.saturating_sub(1);
        match result {
            Ok(items) => {
                let rows = items.len();
                state.items = items;
                state.loaded = true;
                state.error = None;
                state.release_confirmations_before(generation);
                tracing::info!(rows, "collection loaded");
                Ok(rows)
            }
            Err(error) => {
                tracing::warn!(%error, "collection load failed");
                state.error = Some(error.clone());
                Err(error)
            }
        }
    }
}
