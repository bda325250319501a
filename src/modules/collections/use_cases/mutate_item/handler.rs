// Confirm-then-mutate flow for one item of the collection.
//
// Responsibilities
// - `begin_mutation` parks the intent behind a confirmation token; nothing is sent yet.
// - `commit` re-reads the item, decides the write from its current value, sends it and
//   patches the local collection only if the remote write succeeded.
// - `abort` releases the item without any remote call.
// - `request_mutation` runs the three steps with a synchronous confirmation predicate.
//
// An item that is waiting for confirmation or committing rejects further attempts.
// A successful load releases confirmations opened before it started, so a token that is
// never resolved does not hold its item forever. Rejected attempts are returned, not
// recorded as the collection error.

use crate::modules::collections::controller::CollectionController;
use crate::modules::collections::core::item::CollectionItem;
use crate::modules::collections::core::state::{ItemPhase, PendingMutation};
use crate::modules::collections::use_cases::mutate_item::command::{
    ConfirmationPrompt, MutationIntent,
};
use crate::modules::collections::use_cases::mutate_item::decide::{apply_write, decide_mutation};
use crate::modules::collections::use_cases::mutate_item::decision::PlannedWrite;
use crate::shared::core::errors::ControllerError;
use crate::shared::core::primitives::Row;
use crate::shared::infrastructure::remote_store::RemoteStore;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct PendingConfirmation {
    pub token: Uuid,
    pub prompt: ConfirmationPrompt,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome<T: CollectionItem> {
    Aborted,
    Removed(T),
    Updated(T),
}

impl<TStore, TItem> CollectionController<TStore, TItem>
where
    TStore: RemoteStore + ?Sized,
    TItem: CollectionItem,
{
    #[tracing::instrument(skip(self, id, intent), fields(kind = TItem::KIND, %id))]
    pub async fn begin_mutation(
        &self,
        id: &TItem::Id,
        intent: MutationIntent<TItem::Status>,
    ) -> Result<PendingConfirmation, ControllerError> {
        let mut state = self.state.write().await;
        let result = match state.get(id) {
            None => Err(ControllerError::not_found(TItem::KIND, id)),
            Some(_) if state.phase(id) != ItemPhase::Idle => {
                Err(ControllerError::in_progress(TItem::KIND, id))
            }
            Some(item) => Ok(ConfirmationPrompt::for_write(
                item,
                &decide_mutation(item, &intent),
            )),
        };
        let prompt = match result {
            Ok(prompt) => prompt,
            Err(error) => {
                tracing::warn!(%error, "mutation rejected");
                return Err(error);
            }
        };

        let token = Uuid::now_v7();
        let generation = state.load_generation;
        state.phases.insert(id.clone(), ItemPhase::ConfirmPending);
        state.pending.insert(
            token,
            PendingMutation {
                id: id.clone(),
                intent,
                generation,
            },
        );
        tracing::debug!(%token, "awaiting confirmation");
        Ok(PendingConfirmation { token, prompt })
    }

    #[tracing::instrument(skip(self), fields(kind = TItem::KIND))]
    pub async fn abort(&self, token: Uuid) -> Result<MutationOutcome<TItem>, ControllerError> {
        let mut state = self.state.write().await;
        let pending = state
            .pending
            .remove(&token)
            .ok_or(ControllerError::UnknownConfirmation(token))?;
        state.settle(&pending.id);
        tracing::debug!(id = %pending.id, "mutation declined");
        Ok(MutationOutcome::Aborted)
    }

    #[tracing::instrument(skip(self), fields(kind = TItem::KIND))]
    pub async fn commit(&self, token: Uuid) -> Result<MutationOutcome<TItem>, ControllerError> {
        let (id, before, write) = {
            let mut state = self.state.write().await;
            let pending = state
                .pending
                .remove(&token)
                .ok_or(ControllerError::UnknownConfirmation(token))?;
            let Some(before) = state.get(&pending.id).cloned() else {
                state.settle(&pending.id);
                let error = ControllerError::not_found(TItem::KIND, &pending.id);
                tracing::warn!(%error, "mutation rejected");
                return Err(error);
            };
            let write = decide_mutation(&before, &pending.intent);
            state.phases.insert(pending.id.clone(), ItemPhase::Committing);
            (pending.id, before, write)
        };

        let result = self.send(&id, &write).await;

        let mut state = self.state.write().await;
        state.settle(&id);
        if let Err(error) = result {
            tracing::warn!(%id, %error, "remote write failed, local collection left unchanged");
            state.error = Some(error.clone());
            return Err(error);
        }
        state.error = None;
        tracing::info!(%id, "mutation committed");
        // A load that completed while the write was in flight may already have replaced
        // the row; the write still went through.
        let affected = apply_write(&mut state.items, &id, &write);
        Ok(match write {
            PlannedWrite::Remove => MutationOutcome::Removed(affected.unwrap_or(before)),
            PlannedWrite::SetStatus { to, .. } => MutationOutcome::Updated(affected.unwrap_or_else(|| {
                let mut updated = before;
                updated.set_status(to);
                updated
            })),
        })
    }

    /// Asks `confirm` before doing anything. A declined confirmation sends nothing and
    /// leaves the collection untouched.
    pub async fn request_mutation<F>(
        &self,
        id: &TItem::Id,
        intent: MutationIntent<TItem::Status>,
        confirm: F,
    ) -> Result<MutationOutcome<TItem>, ControllerError>
    where
        F: FnOnce(&ConfirmationPrompt) -> bool,
    {
        let pending = self.begin_mutation(id, intent).await?;
        if confirm(&pending.prompt) {
            self.commit(pending.token).await
        } else {
            self.abort(pending.token).await
        }
    }

    async fn send(
        &self,
        id: &TItem::Id,
        write: &PlannedWrite<TItem::Status>,
    ) -> Result<(), ControllerError> {
        let key = Self::key_of(id)?;
        let sent = match write {
            PlannedWrite::Remove => self.store.delete(TItem::KIND, &key).await,
            PlannedWrite::SetStatus { to, .. } => {
                let value = serde_json::to_value(to)
                    .map_err(|e| ControllerError::write(TItem::KIND, id, e))?;
                let mut patch = Row::new();
                patch.insert(TItem::STATUS_FIELD.to_string(), value);
                self.store.update(TItem::KIND, &key, patch).await
            }
        };
        sent.map_err(|e| ControllerError::write(TItem::KIND, id, e))
    }
}
