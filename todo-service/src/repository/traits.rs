//! Repository trait for list storage
//!
//! The trait uses RPITIT (Return Position Impl Trait In Traits) so handlers
//! can be generic over the store without boxing futures.

use std::future::Future;

use super::error::RepositoryError;
use super::filters::{Filters, Metadata};
use crate::models::List;

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Text filters for [`ListStore::get_all`]
///
/// An empty string matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSearch {
    /// Full-text match against `name`
    pub name: String,
    /// Full-text match against `task`
    pub task: String,
    /// Exact match against `status`
    pub status: String,
}

/// Persistent storage for [`List`] records
///
/// Implementations must bound every call with a deadline and must never
/// retry on their own.
pub trait ListStore: Clone + Send + Sync + 'static {
    /// Persist a new list
    ///
    /// The store assigns `id`, `created_at` and `version = 1`, and writes them
    /// back into `list`.
    fn insert(&self, list: &mut List) -> impl Future<Output = RepositoryResult<()>> + Send;

    /// Fetch a list by id
    ///
    /// # Errors
    ///
    /// `NotFound` when `id < 1` or no row matches.
    fn get(&self, id: i64) -> impl Future<Output = RepositoryResult<List>> + Send;

    /// Replace `name`, `task` and `status` if the stored version still equals
    /// `list.version`
    ///
    /// On success the stored version is incremented and written back into
    /// `list`.
    ///
    /// # Errors
    ///
    /// `EditConflict` when the row is gone or its version has moved on. The
    /// stored record is left untouched.
    fn update(&self, list: &mut List) -> impl Future<Output = RepositoryResult<()>> + Send;

    /// Permanently remove a list
    ///
    /// # Errors
    ///
    /// `NotFound` when `id < 1` or nothing was deleted.
    fn delete(&self, id: i64) -> impl Future<Output = RepositoryResult<()>> + Send;

    /// Fetch one page of lists matching `search`
    ///
    /// Results are ordered by the filters' sort column and direction, then
    /// by `id` ascending. The metadata counts every matching record, not just
    /// the returned page.
    fn get_all(
        &self,
        search: &ListSearch,
        filters: &Filters,
    ) -> impl Future<Output = RepositoryResult<(Vec<List>, Metadata)>> + Send;
}
