//! PostgreSQL-backed list repository

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::error::{RepositoryError, RepositoryOperation};
use super::filters::{calculate_metadata, Filters, Metadata};
use super::traits::{ListSearch, ListStore, RepositoryResult};
use crate::models::List;

const INSERT_SQL: &str = r#"
    INSERT INTO lists (name, task, status)
    VALUES ($1, $2, $3)
    RETURNING id, created_at, version
"#;

const GET_SQL: &str = r#"
    SELECT id, created_at, name, task, status, version
    FROM lists
    WHERE id = $1
"#;

const UPDATE_SQL: &str = r#"
    UPDATE lists
    SET name = $1, task = $2, status = $3, version = version + 1
    WHERE id = $4 AND version = $5
    RETURNING version
"#;

const DELETE_SQL: &str = r#"
    DELETE FROM lists
    WHERE id = $1
"#;

/// Row shape of the paginated search; `total_records` is a window count
#[derive(Debug, FromRow)]
struct ListRow {
    total_records: i64,
    #[sqlx(flatten)]
    list: List,
}

/// Search predicate over $1 name, $2 task and $3 status; empty matches all
const SEARCH_PREDICATE: &str = r#"
    (to_tsvector('simple', name) @@ plainto_tsquery('simple', $1) OR $1 = '')
    AND (to_tsvector('simple', task) @@ plainto_tsquery('simple', $2) OR $2 = '')
    AND (status = $3 OR $3 = '')"#;

/// Count of every record matching the search, for pages past the end
fn count_query_sql() -> String {
    format!("SELECT count(*) FROM lists WHERE {}", SEARCH_PREDICATE)
}

/// Render the paginated search query
///
/// The ORDER BY column and direction are interpolated, everything else is a
/// bind parameter. Returns an error instead of SQL when `sort` is not in the
/// filters' allow-list.
pub(crate) fn list_query_sql(filters: &Filters) -> RepositoryResult<String> {
    if !filters.sort_is_safe() {
        return Err(RepositoryError::database(
            RepositoryOperation::GetAll,
            format!("unsafe sort parameter: {:?}", filters.sort),
        ));
    }

    Ok(format!(
        r#"
    SELECT count(*) OVER() AS total_records, id, created_at, name, task, status, version
    FROM lists
    WHERE {}
    ORDER BY {} {}, id ASC
    LIMIT $4 OFFSET $5"#,
        SEARCH_PREDICATE,
        filters.sort_column(),
        filters.sort_order()
    ))
}

/// List repository over a shared PostgreSQL pool
///
/// Cloning is cheap; `PgPool` is reference counted.
#[derive(Debug, Clone)]
pub struct PgListRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgListRepository {
    /// Create a repository that bounds each query by `query_timeout`
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    async fn with_deadline<T>(
        &self,
        operation: RepositoryOperation,
        query: impl Future<Output = Result<T, sqlx::Error>>,
    ) -> RepositoryResult<T> {
        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(result) => result.map_err(|e| RepositoryError::from_sqlx(operation, e)),
            Err(_) => Err(RepositoryError::timeout(
                operation,
                format!("query exceeded {:?} deadline", self.query_timeout),
            )),
        }
    }
}

impl ListStore for PgListRepository {
    #[tracing::instrument(level = "debug", skip_all)]
    async fn insert(&self, list: &mut List) -> RepositoryResult<()> {
        let (id, created_at, version): (i64, DateTime<Utc>, i32) = self
            .with_deadline(
                RepositoryOperation::Insert,
                sqlx::query_as(INSERT_SQL)
                    .bind(list.name.as_str())
                    .bind(list.task.as_str())
                    .bind(list.status.as_str())
                    .fetch_one(&self.pool),
            )
            .await?;

        list.id = id;
        list.created_at = created_at;
        list.version = version;
        tracing::debug!(list.id = id, "list inserted");
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get(&self, id: i64) -> RepositoryResult<List> {
        if id < 1 {
            return Err(RepositoryError::not_found(RepositoryOperation::Get, id));
        }

        self.with_deadline(
            RepositoryOperation::Get,
            sqlx::query_as::<_, List>(GET_SQL)
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await?
        .ok_or_else(|| RepositoryError::not_found(RepositoryOperation::Get, id))
    }

    #[tracing::instrument(level = "debug", skip_all, fields(list.id = list.id, list.version = list.version))]
    async fn update(&self, list: &mut List) -> RepositoryResult<()> {
        let version: Option<(i32,)> = self
            .with_deadline(
                RepositoryOperation::Update,
                sqlx::query_as(UPDATE_SQL)
                    .bind(list.name.as_str())
                    .bind(list.task.as_str())
                    .bind(list.status.as_str())
                    .bind(list.id)
                    .bind(list.version)
                    .fetch_optional(&self.pool),
            )
            .await?;

        match version {
            Some((version,)) => {
                list.version = version;
                Ok(())
            }
            None => Err(RepositoryError::edit_conflict(list.id)),
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        if id < 1 {
            return Err(RepositoryError::not_found(RepositoryOperation::Delete, id));
        }

        let result = self
            .with_deadline(
                RepositoryOperation::Delete,
                sqlx::query(DELETE_SQL).bind(id).execute(&self.pool),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(RepositoryOperation::Delete, id));
        }
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_all(
        &self,
        search: &ListSearch,
        filters: &Filters,
    ) -> RepositoryResult<(Vec<List>, Metadata)> {
        let sql = list_query_sql(filters)?;

        let rows = self
            .with_deadline(
                RepositoryOperation::GetAll,
                sqlx::query_as::<_, ListRow>(&sql)
                    .bind(search.name.as_str())
                    .bind(search.task.as_str())
                    .bind(search.status.as_str())
                    .bind(filters.limit())
                    .bind(filters.offset())
                    .fetch_all(&self.pool),
            )
            .await?;

        let total_records = match rows.first() {
            Some(row) => row.total_records,
            // the window count is lost once OFFSET passes the last match
            None if filters.offset() > 0 => {
                self.with_deadline(
                    RepositoryOperation::GetAll,
                    sqlx::query_scalar::<_, i64>(&count_query_sql())
                        .bind(search.name.as_str())
                        .bind(search.task.as_str())
                        .bind(search.status.as_str())
                        .fetch_one(&self.pool),
                )
                .await?
            }
            None => 0,
        };
        let lists = rows.into_iter().map(|row| row.list).collect();
        let metadata = calculate_metadata(total_records, filters.page, filters.page_size);

        Ok((lists, metadata))
    }
}
