//! Route table for the `/v1` API

use axum::{
    http::Method,
    routing::get,
    Router,
};

use crate::handlers::{health, lists, ApiError};
use crate::repository::ListStore;
use crate::state::AppState;

/// Build the application router over any list store
///
/// Unknown paths answer 404 and known paths with an unsupported method
/// answer 405, both with the standard error envelope.
pub fn router<S: ListStore>(state: AppState<S>) -> Router {
    Router::new()
        .route("/v1/healthcheck", get(health::healthcheck::<S>))
        .route(
            "/v1/list",
            get(lists::list_lists::<S>).post(lists::create_list::<S>),
        )
        .route(
            "/v1/list/{id}",
            get(lists::show_list::<S>)
                .put(lists::replace_list::<S>)
                .patch(lists::update_list::<S>)
                .delete(lists::delete_list::<S>),
        )
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::not_found()
}

async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::method_not_allowed(&method)
}
