//! List persistence
//!
//! - [`ListStore`]: the storage contract handlers are generic over
//! - [`PgListRepository`]: PostgreSQL implementation with per-query deadlines
//! - [`Filters`] and [`Metadata`]: pagination, sort allow-listing and page summaries
//! - [`RepositoryError`]: NotFound / EditConflict / internal failure taxonomy
//!
//! # Example
//!
//! ```rust,ignore
//! use todo_service::repository::{Filters, ListSearch, ListStore, PgListRepository, LIST_SORT_SAFELIST};
//!
//! let repo = PgListRepository::new(pool, Duration::from_secs(3));
//!
//! let mut list = List::new("groceries", "buy milk", "pending");
//! repo.insert(&mut list).await?;
//!
//! list.status = "done".to_string();
//! repo.update(&mut list).await?; // fails with EditConflict if someone else got there first
//!
//! let filters = Filters::new(1, 20, "-created_at", LIST_SORT_SAFELIST);
//! let (lists, metadata) = repo.get_all(&ListSearch::default(), &filters).await?;
//! ```

mod error;
mod filters;
mod postgres;
mod traits;

#[cfg(test)]
pub(crate) mod memory;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use filters::{
    calculate_metadata, validate_filters, Filters, Metadata, LIST_SORT_SAFELIST, MAX_PAGE,
    MAX_PAGE_SIZE,
};
pub use postgres::PgListRepository;
pub use traits::{ListSearch, ListStore, RepositoryResult};
