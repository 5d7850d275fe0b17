//! # List-Query Pipeline
//!
//! Translates a decoded querystring into a filtered, sorted, projected,
//! paginated read against a document collection.
//!
//! ```ignore
//! use studify::query::{run, RawQuery};
//!
//! let raw = RawQuery::parse("category=Focus&rating[gte]=4&sort=-views&limit=5")?;
//! let page = run(collection.as_ref(), &raw, 100)?;
//! ```

pub mod compare;
pub mod errors;
pub mod filter;
pub mod page;
pub mod pipeline;
pub mod projection;
pub mod raw;
pub mod sort;

pub use errors::{QueryError, QueryResult};
pub use filter::{build_filter, Condition, ParsedFilter, Predicate, RESERVED_KEYS};
pub use page::{build_page, PageRequest, Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use pipeline::{execute, run, ListQuery, PageResult, PipelineError, PipelineResult};
pub use projection::{build_projection, Projection, ID_FIELD};
pub use raw::{RawQuery, RawValue};
pub use sort::{build_sort, SortDirection, SortKey, SortSpec, DEFAULT_SORT_FIELD};
