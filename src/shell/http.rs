use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::collections::controller::CollectionController;
use crate::modules::collections::core::item::CollectionItem;
use crate::modules::collections::use_cases::mutate_item::command::MutationIntent;
use crate::modules::collections::use_cases::mutate_item::handler::MutationOutcome;
use crate::modules::device_search::core::state::SearchSnapshot;
use crate::modules::device_search::core::view_record::ViewRecord;
use crate::shared::core::errors::ControllerError;
use crate::shell::state::{AppState, Store};

type Controller<T> = Arc<CollectionController<Store, T>>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/admins", collection_routes(state.admins.clone()))
        .nest("/users", collection_routes(state.users.clone()))
        .nest("/reviews", collection_routes(state.reviews.clone()))
        .route("/device-search", get(search_snapshot).post(search))
        .route(
            "/device-search/rows/{index}/toggle-returned",
            post(toggle_returned),
        )
        .route("/device-search/rows/{index}", delete(remove_row))
        .with_state(state)
}

fn collection_routes<T: CollectionItem>(controller: Controller<T>) -> Router<AppState> {
    Router::new()
        .route("/", get(list::<T>).post(create::<T>))
        .route("/load", post(load::<T>))
        .route("/{id}/mutations", post(begin_mutation::<T>))
        .route("/mutations/{token}/commit", post(commit::<T>))
        .route("/mutations/{token}/abort", post(abort::<T>))
        .with_state(controller)
}

fn error_response(error: ControllerError) -> Response {
    let status = match &error {
        ControllerError::NotFound { .. } | ControllerError::UnknownConfirmation(_) => {
            StatusCode::NOT_FOUND
        }
        ControllerError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ControllerError::MutationInProgress { .. } => StatusCode::CONFLICT,
        ControllerError::RemoteReadFailure { .. } | ControllerError::RemoteWriteFailure { .. } => {
            StatusCode::BAD_GATEWAY
        }
    };
    (status, Json(ErrorBody { error: error.to_string() })).into_response()
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct CollectionView<T> {
    items: Vec<T>,
    error: Option<String>,
    loaded: bool,
    loading: bool,
}

#[derive(Serialize)]
struct PendingView {
    token: Uuid,
    prompt: String,
}

#[derive(Serialize)]
#[serde(tag = "outcome", content = "item", rename_all = "snake_case")]
enum OutcomeView<T> {
    Aborted,
    Removed(T),
    Updated(T),
}

impl<T: CollectionItem> From<MutationOutcome<T>> for OutcomeView<T> {
    fn from(outcome: MutationOutcome<T>) -> Self {
        match outcome {
            MutationOutcome::Aborted => OutcomeView::Aborted,
            MutationOutcome::Removed(item) => OutcomeView::Removed(item),
            MutationOutcome::Updated(item) => OutcomeView::Updated(item),
        }
    }
}

async fn list<T: CollectionItem>(State(controller): State<Controller<T>>) -> Response {
    let snapshot = controller.snapshot().await;
    Json(CollectionView {
        items: snapshot.items,
        error: snapshot.error.map(|e| e.to_string()),
        loaded: snapshot.loaded,
        loading: snapshot.loading,
    })
    .into_response()
}

async fn load<T: CollectionItem>(State(controller): State<Controller<T>>) -> Response {
    match controller.load().await {
        Ok(_) => list(State(controller)).await,
        Err(error) => error_response(error),
    }
}

async fn create<T: CollectionItem>(
    State(controller): State<Controller<T>>,
    body: Result<Json<T>, JsonRejection>,
) -> Response {
    let Ok(Json(draft)) = body else {
        return StatusCode::UNPROCESSABLE_ENTITY.into_response();
    };
    match controller.create(draft).await {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn begin_mutation<T: CollectionItem>(
    State(controller): State<Controller<T>>,
    Path(id): Path<String>,
    body: Result<Json<MutationIntent<T::Status>>, JsonRejection>,
) -> Response {
    let Ok(id) = id.parse::<T::Id>() else {
        return error_response(ControllerError::InvalidInput(format!(
            "{id} is not a valid {}",
            T::ID_FIELD
        )));
    };
    let Ok(Json(intent)) = body else {
        return StatusCode::UNPROCESSABLE_ENTITY.into_response();
    };
    match controller.begin_mutation(&id, intent).await {
        Ok(pending) => (
            StatusCode::ACCEPTED,
            Json(PendingView {
                token: pending.token,
                prompt: pending.prompt.to_string(),
            }),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

async fn commit<T: CollectionItem>(
    State(controller): State<Controller<T>>,
    Path(token): Path<Uuid>,
) -> Response {
    match controller.commit(token).await {
        Ok(outcome) => Json(OutcomeView::from(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn abort<T: CollectionItem>(
    State(controller): State<Controller<T>>,
    Path(token): Path<Uuid>,
) -> Response {
    match controller.abort(token).await {
        Ok(outcome) => Json(OutcomeView::from(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Deserialize)]
pub struct SearchBody {
    pub lookup_key: String,
}

#[derive(Serialize)]
struct SearchRowView {
    #[serde(flatten)]
    record: ViewRecord,
    amount_display: String,
}

#[derive(Serialize)]
struct SearchView {
    rows: Vec<SearchRowView>,
    error: Option<String>,
    last_key: Option<String>,
    searching: bool,
    total: String,
}

impl From<SearchSnapshot> for SearchView {
    fn from(snapshot: SearchSnapshot) -> Self {
        let total = snapshot.total_display();
        Self {
            rows: snapshot
                .rows
                .into_iter()
                .map(|record| SearchRowView {
                    amount_display: record.amount_display(),
                    record,
                })
                .collect(),
            error: snapshot.error.map(|e| e.to_string()),
            last_key: snapshot.last_key,
            searching: snapshot.searching,
            total,
        }
    }
}

async fn search_snapshot(State(state): State<AppState>) -> Response {
    Json(SearchView::from(state.device_search.snapshot().await)).into_response()
}

// The scope comes from configuration, never from the request.
async fn search(
    State(state): State<AppState>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> Response {
    let Ok(Json(body)) = body else {
        return StatusCode::UNPROCESSABLE_ENTITY.into_response();
    };
    match state.device_search.search(&body.lookup_key, state.scope).await {
        Ok(_) => search_snapshot(State(state)).await,
        Err(error) => error_response(error),
    }
}

async fn toggle_returned(State(state): State<AppState>, Path(index): Path<usize>) -> Response {
    match state.device_search.toggle_returned(index).await {
        Ok(_) => search_snapshot(State(state)).await,
        Err(error) => error_response(error),
    }
}

async fn remove_row(State(state): State<AppState>, Path(index): Path<usize>) -> Response {
    match state.device_search.remove_row(index).await {
        Ok(_) => search_snapshot(State(state)).await,
        Err(error) => error_response(error),
    }
}
