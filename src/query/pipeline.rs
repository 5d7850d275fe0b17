//! # List-Query Pipeline
//!
//! Raw query → filter/sort/projection/page → one count and one fetch
//! against a [`Collection`] → [`PageResult`].
//!
//! The count and the fetch are two separate reads. Under concurrent writes
//! `total` can disagree with `items`; callers get no consistency guarantee
//! across the pair.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::errors::{QueryError, QueryResult};
use super::filter::{build_filter, ParsedFilter};
use super::page::{build_page, PageRequest, Pagination};
use super::projection::{build_projection, Projection};
use super::raw::RawQuery;
use super::sort::{build_sort, SortSpec};
use crate::store::{Collection, StoreError, StoreResult};

/// Result type for a full pipeline run
pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    /// Client sent a query that cannot be interpreted
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Store failure, passed through unchanged
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Every stage of a list request, parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: ParsedFilter,
    pub sort: SortSpec,
    pub projection: Projection,
    pub page: PageRequest,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filter: ParsedFilter::new(),
            sort: SortSpec::default(),
            projection: Projection::all(),
            page: PageRequest::default(),
        }
    }
}

impl ListQuery {
    pub fn from_raw(raw: &RawQuery) -> QueryResult<Self> {
        Ok(Self {
            filter: build_filter(raw)?,
            sort: build_sort(raw)?,
            projection: build_projection(raw)?,
            page: build_page(raw),
        })
    }

    /// Bound the page size
    pub fn capped(mut self, max_limit: u64) -> Self {
        self.page = self.page.capped(max_limit);
        self
    }

    pub fn execute<C: Collection + ?Sized>(&self, collection: &C) -> StoreResult<PageResult> {
        execute(
            collection,
            &self.filter,
            &self.sort,
            &self.projection,
            self.page,
        )
    }
}

/// One page of documents plus the links around it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult {
    pub items: Vec<Value>,
    pub count: usize,
    pub total: u64,
    pub pagination: Pagination,
}

/// Count, then fetch one window of matching documents
pub fn execute<C: Collection + ?Sized>(
    collection: &C,
    filter: &ParsedFilter,
    sort: &SortSpec,
    projection: &Projection,
    page: PageRequest,
) -> StoreResult<PageResult> {
    debug!(
        collection = collection.name(),
        filter = %filter.to_document(),
        sort = %sort,
        page = page.page,
        limit = page.limit,
        "executing list query"
    );

    let total = collection.count(filter)?;
    let items = collection.find(filter, sort, projection, page.skip(), page.limit)?;
    let count = items.len();

    debug!(collection = collection.name(), total, count, "list query complete");

    Ok(PageResult {
        items,
        count,
        total,
        pagination: Pagination::for_page(page, total),
    })
}

/// Parse `raw`, bound the page size and execute
pub fn run<C: Collection + ?Sized>(
    collection: &C,
    raw: &RawQuery,
    max_limit: u64,
) -> PipelineResult<PageResult> {
    let query = ListQuery::from_raw(raw)?.capped(max_limit);
    Ok(query.execute(collection)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortKey;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Collection that records calls and serves a fixed set of documents
    struct Recording {
        docs: Vec<Value>,
        counts: AtomicUsize,
        finds: AtomicUsize,
        fail: bool,
    }

    impl Recording {
        fn with_views(views: &[u64]) -> Self {
            Self {
                docs: views
                    .iter()
                    .enumerate()
                    .map(|(i, v)| serde_json::json!({"_id": i.to_string(), "views": v}))
                    .collect(),
                counts: AtomicUsize::new(0),
                finds: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::with_views(&[])
            }
        }
    }

    impl Collection for Recording {
        fn name(&self) -> &str {
            "recording"
        }

        fn count(&self, filter: &ParsedFilter) -> StoreResult<u64> {
            self.counts.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(StoreError::LockPoisoned("recording".to_string()));
            }
            Ok(self.docs.iter().filter(|d| filter.matches(d)).count() as u64)
        }

        fn find(
            &self,
            filter: &ParsedFilter,
            sort: &SortSpec,
            projection: &Projection,
            skip: u64,
            limit: u64,
        ) -> StoreResult<Vec<Value>> {
            self.finds.fetch_add(1, Ordering::SeqCst);
            let mut docs: Vec<Value> = self
                .docs
                .iter()
                .filter(|d| filter.matches(d))
                .cloned()
                .collect();
            sort.sort(&mut docs);
            Ok(docs
                .into_iter()
                .skip(skip as usize)
                .take(limit as usize)
                .map(|d| projection.apply(d))
                .collect())
        }
    }

    #[test]
    fn test_one_count_and_one_find_per_run() {
        let collection = Recording::with_views(&[1, 2, 3]);
        run(&collection, &RawQuery::new(), 100).unwrap();

        assert_eq!(collection.counts.load(Ordering::SeqCst), 1);
        assert_eq!(collection.finds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_middle_page_of_twenty_five() {
        let views: Vec<u64> = (0..25).collect();
        let collection = Recording::with_views(&views);
        let raw = RawQuery::parse("page=2&limit=10&sort=views").unwrap();

        let result = run(&collection, &raw, 100).unwrap();

        assert_eq!(result.total, 25);
        assert_eq!(result.count, 10);
        assert_eq!(result.items[0]["views"], 10);
        assert_eq!(result.pagination.prev, Some(PageRequest::new(1, 10)));
        assert_eq!(result.pagination.next, Some(PageRequest::new(3, 10)));
    }

    #[test]
    fn test_last_partial_page() {
        let views: Vec<u64> = (0..25).collect();
        let collection = Recording::with_views(&views);
        let raw = RawQuery::parse("page=3&limit=10").unwrap();

        let result = run(&collection, &raw, 100).unwrap();

        assert_eq!(result.count, 5);
        assert_eq!(result.pagination.next, None);
        assert_eq!(result.pagination.prev, Some(PageRequest::new(2, 10)));
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let collection = Recording::with_views(&[1, 2]);
        let raw = RawQuery::parse("page=5&limit=10").unwrap();

        let result = run(&collection, &raw, 100).unwrap();

        assert!(result.items.is_empty());
        assert_eq!(result.total, 2);
        assert_eq!(result.pagination.next, None);
    }

    #[test]
    fn test_limit_is_capped() {
        let collection = Recording::with_views(&[1, 2, 3]);
        let raw = RawQuery::parse("limit=1000").unwrap();

        let result = run(&collection, &raw, 2).unwrap();

        assert_eq!(result.count, 2);
        assert_eq!(result.pagination.next, Some(PageRequest::new(2, 2)));
    }

    #[test]
    fn test_invalid_query_never_reaches_the_store() {
        let collection = Recording::with_views(&[1]);
        let raw = RawQuery::parse("views[regex]=.*").unwrap();

        let err = run(&collection, &raw, 100).unwrap_err();

        assert!(matches!(err, PipelineError::Query(QueryError::UnknownOperator { .. })));
        assert_eq!(collection.counts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_store_errors_pass_through() {
        let collection = Recording::failing();
        let err = run(&collection, &RawQuery::new(), 100).unwrap_err();
        assert!(matches!(err, PipelineError::Store(StoreError::LockPoisoned(_))));
    }

    #[test]
    fn test_from_raw_collects_every_stage() {
        let raw = RawQuery::parse("category=AI&sort=-views&select=name&page=2&limit=5").unwrap();
        let query = ListQuery::from_raw(&raw).unwrap();

        assert_eq!(query.filter, ParsedFilter::new().equals("category", "AI"));
        assert_eq!(query.sort.keys(), &[SortKey::desc("views")]);
        assert_eq!(query.projection, Projection::of(["name"]));
        assert_eq!(query.page, PageRequest::new(2, 5));
        assert_eq!(ListQuery::from_raw(&raw).unwrap(), query);
    }
}
