//! List endpoint handlers

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use super::error::ApiError;
use super::extract::{read_int, read_string, JsonBody, ListId};
use super::response::{ListEnvelope, ListsEnvelope, MessageEnvelope};
use crate::models::{validate_list, List, ListInput, ListPatch};
use crate::repository::{validate_filters, Filters, ListSearch, ListStore, LIST_SORT_SAFELIST};
use crate::state::AppState;
use crate::validator::Validator;

/// Optional precondition header for updates
pub const EXPECTED_VERSION_HEADER: &str = "x-expected-version";

/// Default page number for the list endpoint
pub const DEFAULT_PAGE: i64 = 1;

/// Default page size for the list endpoint
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Default sort for the list endpoint
pub const DEFAULT_SORT: &str = "id";

fn ensure_valid(list: &List) -> Result<(), ApiError> {
    let mut v = Validator::new();
    validate_list(&mut v, list);
    if v.valid() {
        Ok(())
    } else {
        Err(ApiError::failed_validation(v.into_errors()))
    }
}

/// Reject the request if `X-Expected-Version` is present and stale
fn check_expected_version(headers: &HeaderMap, list: &List) -> Result<(), ApiError> {
    let Some(raw) = headers.get(EXPECTED_VERSION_HEADER) else {
        return Ok(());
    };

    let expected: i32 = raw
        .to_str()
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| ApiError::bad_request("X-Expected-Version header must be an integer"))?;

    if expected != list.version {
        return Err(ApiError::edit_conflict());
    }
    Ok(())
}

/// `POST /v1/list`
#[tracing::instrument(skip_all)]
pub async fn create_list<S: ListStore>(
    State(state): State<AppState<S>>,
    JsonBody(input): JsonBody<ListInput>,
) -> Result<impl IntoResponse, ApiError> {
    let mut list = List::from(input);
    ensure_valid(&list)?;

    state.lists().insert(&mut list).await?;
    tracing::info!(list.id = list.id, "list created");

    let location = format!("/v1/list/{}", list.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ListEnvelope { list }),
    ))
}

/// `GET /v1/list/{id}`
#[tracing::instrument(skip(state))]
pub async fn show_list<S: ListStore>(
    State(state): State<AppState<S>>,
    ListId(id): ListId,
) -> Result<Json<ListEnvelope>, ApiError> {
    let list = state.lists().get(id).await?;
    Ok(Json(ListEnvelope { list }))
}

/// `PUT /v1/list/{id}`: replace every user-editable field
#[tracing::instrument(skip(state, headers, input))]
pub async fn replace_list<S: ListStore>(
    State(state): State<AppState<S>>,
    ListId(id): ListId,
    headers: HeaderMap,
    JsonBody(input): JsonBody<ListInput>,
) -> Result<Json<ListEnvelope>, ApiError> {
    let mut list = state.lists().get(id).await?;
    check_expected_version(&headers, &list)?;

    input.replace(&mut list);
    ensure_valid(&list)?;

    state.lists().update(&mut list).await?;
    tracing::info!(list.id = list.id, list.version = list.version, "list replaced");
    Ok(Json(ListEnvelope { list }))
}

/// `PATCH /v1/list/{id}`: change only the fields present in the body
#[tracing::instrument(skip(state, headers, patch))]
pub async fn update_list<S: ListStore>(
    State(state): State<AppState<S>>,
    ListId(id): ListId,
    headers: HeaderMap,
    JsonBody(patch): JsonBody<ListPatch>,
) -> Result<Json<ListEnvelope>, ApiError> {
    let mut list = state.lists().get(id).await?;
    check_expected_version(&headers, &list)?;

    patch.apply(&mut list);
    ensure_valid(&list)?;

    state.lists().update(&mut list).await?;
    tracing::info!(list.id = list.id, list.version = list.version, "list updated");
    Ok(Json(ListEnvelope { list }))
}

/// `DELETE /v1/list/{id}`
#[tracing::instrument(skip(state))]
pub async fn delete_list<S: ListStore>(
    State(state): State<AppState<S>>,
    ListId(id): ListId,
) -> Result<Json<MessageEnvelope>, ApiError> {
    state.lists().delete(id).await?;
    tracing::info!(list.id = id, "list deleted");
    Ok(Json(MessageEnvelope::new("list successfully deleted")))
}

/// `GET /v1/list?name=&task=&status=&page=&page_size=&sort=`
#[tracing::instrument(skip(state))]
pub async fn list_lists<S: ListStore>(
    State(state): State<AppState<S>>,
    Query(qs): Query<HashMap<String, String>>,
) -> Result<Json<ListsEnvelope>, ApiError> {
    let mut v = Validator::new();

    let search = ListSearch {
        name: read_string(&qs, "name", ""),
        task: read_string(&qs, "task", ""),
        status: read_string(&qs, "status", ""),
    };
    let filters = Filters::new(
        read_int(&qs, "page", DEFAULT_PAGE, &mut v),
        read_int(&qs, "page_size", DEFAULT_PAGE_SIZE, &mut v),
        read_string(&qs, "sort", DEFAULT_SORT),
        LIST_SORT_SAFELIST,
    );

    validate_filters(&mut v, &filters);
    if !v.valid() {
        return Err(ApiError::failed_validation(v.into_errors()));
    }

    let (lists, metadata) = state.lists().get_all(&search, &filters).await?;
    Ok(Json(ListsEnvelope { lists, metadata }))
}
