//! # todo-service
//!
//! HTTP CRUD API for todo lists backed by PostgreSQL.
//!
//! ## Features
//!
//! - **Versioned updates**: every write checks the stored version, so
//!   concurrent edits fail with `409` instead of overwriting each other
//! - **Search and pagination**: full-text filters on `name` and `task`,
//!   exact `status` match, allow-listed sorting and page metadata
//! - **Structured errors**: one JSON envelope for every failure
//! - **Configuration**: figment layering of defaults, TOML files and `TODO_*`
//!   environment variables
//! - **Observability**: JSON logs with typed `req_` request ids
//!
//! ## Endpoints
//!
//! | Method | Path               | Purpose                     |
//! |--------|--------------------|-----------------------------|
//! | GET    | `/v1/healthcheck`  | liveness                    |
//! | GET    | `/v1/list`         | search, sort and paginate   |
//! | POST   | `/v1/list`         | create                      |
//! | GET    | `/v1/list/{id}`    | show                        |
//! | PUT    | `/v1/list/{id}`    | replace                     |
//! | PATCH  | `/v1/list/{id}`    | partial update              |
//! | DELETE | `/v1/list/{id}`    | delete                      |

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod ids;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repository;
pub mod routes;
pub mod server;
pub mod state;
pub mod validator;

pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::handlers::{ApiError, ApiErrorKind};
    pub use crate::models::{List, ListInput, ListPatch};
    pub use crate::repository::{
        Filters, ListSearch, ListStore, Metadata, PgListRepository, RepositoryError,
    };
    pub use crate::server::Server;
    pub use crate::state::AppState;
}
