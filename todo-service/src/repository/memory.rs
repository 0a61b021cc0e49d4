//! In-memory list store used by handler tests
//!
//! Mirrors the PostgreSQL semantics closely enough for HTTP-level tests:
//! store-assigned ids and versions, version-checked updates, word-level
//! case-insensitive search, sorting with an `id` tie-break and window counts.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use super::error::{RepositoryError, RepositoryOperation};
use super::filters::{calculate_metadata, Filters, Metadata};
use super::traits::{ListSearch, ListStore, RepositoryResult};
use crate::models::List;

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    rows: BTreeMap<i64, List>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryListStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryListStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn lock(&self, operation: RepositoryOperation) -> RepositoryResult<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| RepositoryError::database(operation, "store mutex poisoned"))
    }

    /// Snapshot of a stored row, bypassing the trait
    pub(crate) fn row(&self, id: i64) -> Option<List> {
        self.inner.lock().ok()?.rows.get(&id).cloned()
    }
}

/// Lower-cased words of `text`, split on anything that is not alphanumeric
fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Every word of `query` must appear as a word of `text`
fn text_matches(text: &str, query: &str) -> bool {
    let haystack = words(text);
    words(query).iter().all(|w| haystack.contains(w))
}

fn compare(column: &str, a: &List, b: &List) -> Ordering {
    match column {
        "created_at" => a.created_at.cmp(&b.created_at),
        "name" => a.name.cmp(&b.name),
        "task" => a.task.cmp(&b.task),
        "status" => a.status.cmp(&b.status),
        _ => a.id.cmp(&b.id),
    }
}

impl ListStore for MemoryListStore {
    async fn insert(&self, list: &mut List) -> RepositoryResult<()> {
        let mut inner = self.lock(RepositoryOperation::Insert)?;
        inner.next_id += 1;

        list.id = inner.next_id;
        list.created_at = Utc::now();
        list.version = 1;
        inner.rows.insert(list.id, list.clone());
        Ok(())
    }

    async fn get(&self, id: i64) -> RepositoryResult<List> {
        let inner = self.lock(RepositoryOperation::Get)?;
        inner
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(RepositoryOperation::Get, id))
    }

    async fn update(&self, list: &mut List) -> RepositoryResult<()> {
        let mut inner = self.lock(RepositoryOperation::Update)?;
        let stored = inner
            .rows
            .get_mut(&list.id)
            .filter(|stored| stored.version == list.version)
            .ok_or_else(|| RepositoryError::edit_conflict(list.id))?;

        stored.name = list.name.clone();
        stored.task = list.task.clone();
        stored.status = list.status.clone();
        stored.version += 1;
        list.version = stored.version;
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let mut inner = self.lock(RepositoryOperation::Delete)?;
        inner
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found(RepositoryOperation::Delete, id))
    }

    async fn get_all(
        &self,
        search: &ListSearch,
        filters: &Filters,
    ) -> RepositoryResult<(Vec<List>, Metadata)> {
        if !filters.sort_is_safe() {
            return Err(RepositoryError::database(
                RepositoryOperation::GetAll,
                "unsafe sort parameter",
            ));
        }

        let inner = self.lock(RepositoryOperation::GetAll)?;
        let mut matching: Vec<List> = inner
            .rows
            .values()
            .filter(|l| search.name.is_empty() || text_matches(&l.name, &search.name))
            .filter(|l| search.task.is_empty() || text_matches(&l.task, &search.task))
            .filter(|l| search.status.is_empty() || l.status == search.status)
            .cloned()
            .collect();

        let column = filters.sort_column();
        let descending = filters.sort_order() == "DESC";
        matching.sort_by(|a, b| {
            let primary = compare(column, a, b);
            let primary = if descending { primary.reverse() } else { primary };
            primary.then(a.id.cmp(&b.id))
        });

        let total_records = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(filters.offset().max(0) as usize)
            .take(filters.limit().max(0) as usize)
            .collect();

        Ok((
            page,
            calculate_metadata(total_records, filters.page, filters.page_size),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{RepositoryErrorKind, LIST_SORT_SAFELIST};

    async fn seeded(store: &MemoryListStore, count: usize) {
        for i in 0..count {
            let mut list = List::new(format!("list {i}"), "task", "pending");
            store.insert(&mut list).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_store_fields() {
        let store = MemoryListStore::new();
        let mut list = List::new("groceries", "buy milk", "pending");
        store.insert(&mut list).await.unwrap();

        assert_eq!(list.id, 1);
        assert_eq!(list.version, 1);
        assert_eq!(store.get(1).await.unwrap(), list);
    }

    #[tokio::test]
    async fn test_stale_update_is_rejected_and_leaves_row_intact() {
        let store = MemoryListStore::new();
        let mut list = List::new("groceries", "buy milk", "pending");
        store.insert(&mut list).await.unwrap();

        let mut first = list.clone();
        first.status = "done".into();
        store.update(&mut first).await.unwrap();
        assert_eq!(first.version, 2);

        let mut stale = list.clone();
        stale.status = "abandoned".into();
        let err = store.update(&mut stale).await.unwrap_err();
        assert_eq!(err.kind, RepositoryErrorKind::EditConflict);
        assert_eq!(stale.version, 1);
        assert_eq!(store.row(list.id).unwrap().status, "done");
    }

    #[tokio::test]
    async fn test_pagination_window_and_total() {
        let store = MemoryListStore::new();
        seeded(&store, 45).await;

        let filters = Filters::new(1, 20, "id", LIST_SORT_SAFELIST);
        let (page, metadata) = store.get_all(&ListSearch::default(), &filters).await.unwrap();
        assert_eq!(page.len(), 20);
        assert_eq!(metadata.last_page, 3);
        assert_eq!(metadata.total_records, 45);

        let filters = Filters::new(3, 20, "id", LIST_SORT_SAFELIST);
        let (page, _) = store.get_all(&ListSearch::default(), &filters).await.unwrap();
        assert_eq!(page.len(), 5);
        assert_eq!(page[0].id, 41);
    }

    #[tokio::test]
    async fn test_search_and_sort() {
        let store = MemoryListStore::new();
        for (name, status) in [("Weekly Groceries", "pending"), ("groceries", "done"), ("chores", "pending")] {
            let mut list = List::new(name, "task", status);
            store.insert(&mut list).await.unwrap();
        }

        let search = ListSearch {
            name: "GROCERIES".into(),
            ..ListSearch::default()
        };
        let filters = Filters::new(1, 20, "-id", LIST_SORT_SAFELIST);
        let (page, metadata) = store.get_all(&search, &filters).await.unwrap();
        let ids: Vec<_> = page.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(metadata.total_records, 2);

        let search = ListSearch {
            status: "pending".into(),
            ..ListSearch::default()
        };
        let filters = Filters::new(1, 20, "status", LIST_SORT_SAFELIST);
        let (page, _) = store.get_all(&search, &filters).await.unwrap();
        let ids: Vec<_> = page.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_no_matches_is_empty_not_error() {
        let store = MemoryListStore::new();
        seeded(&store, 3).await;

        let search = ListSearch {
            name: "nothing".into(),
            ..ListSearch::default()
        };
        let filters = Filters::new(1, 20, "id", LIST_SORT_SAFELIST);
        let (page, metadata) = store.get_all(&search, &filters).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(metadata, Metadata::default());
    }
}
