//! # Resource Handlers
//!
//! Read endpoints under each resource's mount path:
//!
//! - `GET {base}`, `GET {base}/`: paginated list driven by the querystring
//! - `GET {base}/featured`: up to six featured documents (not on discussions)
//! - `GET {base}/category/:category`: every document in a category
//! - `GET {base}/slug/:slug`: one document by slug, counts a view
//! - `GET {base}/:id`: one document by id, counts a view on discussions

use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery as QueryString, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use tracing::debug;

use super::errors::RestResult;
use super::response::{ListResponse, SingleResponse};
use crate::query::{self, ListQuery, PageRequest, ParsedFilter, RawQuery, ID_FIELD};
use crate::resource::Resource;
use crate::store::MemoryCollection;

/// Number of documents on the featured shelf
pub const FEATURED_LIMIT: u64 = 6;

/// Per-resource handler state
pub struct ResourceState {
    pub resource: Resource,
    pub collection: Arc<MemoryCollection>,
    pub max_limit: u64,
}

/// Create the routes for one resource, at its mount path
pub fn resource_routes(state: Arc<ResourceState>) -> Router {
    let base = state.resource.mount_path();

    let mut router = Router::new()
        .route(base, get(list_handler))
        .route(&format!("{}/", base), get(list_handler))
        .route(&format!("{}/category/:category", base), get(category_handler))
        .route(&format!("{}/slug/:slug", base), get(slug_handler))
        .route(&format!("{}/:id", base), get(get_handler));

    if state.resource.has_featured() {
        router = router.route(&format!("{}/featured", base), get(featured_handler));
    }

    router.with_state(state)
}

/// List documents
async fn list_handler(
    State(state): State<Arc<ResourceState>>,
    QueryString(querystring): QueryString,
) -> RestResult<Json<ListResponse>> {
    let raw = RawQuery::parse(querystring.as_deref().unwrap_or_default())?;
    debug!(resource = %state.resource, params = raw.len(), "list request");

    let page = query::run(state.collection.as_ref(), &raw, state.max_limit)?;
    Ok(Json(page.into()))
}

/// Featured documents, newest first
async fn featured_handler(
    State(state): State<Arc<ResourceState>>,
) -> RestResult<Json<ListResponse>> {
    let featured = ListQuery {
        filter: ParsedFilter::new().equals("isFeatured", "true"),
        page: PageRequest::new(1, FEATURED_LIMIT),
        ..Default::default()
    };

    let page = featured.execute(state.collection.as_ref())?;
    Ok(Json(page.into()))
}

/// Documents in one category
async fn category_handler(
    State(state): State<Arc<ResourceState>>,
    Path(category): Path<String>,
) -> RestResult<Json<ListResponse>> {
    let in_category = ListQuery {
        filter: ParsedFilter::new().equals("category", category),
        page: PageRequest::new(1, state.max_limit),
        ..Default::default()
    };

    let page = in_category.execute(state.collection.as_ref())?;
    Ok(Json(page.into()))
}

/// One document by slug
async fn slug_handler(
    State(state): State<Arc<ResourceState>>,
    Path(slug): Path<String>,
) -> RestResult<Json<SingleResponse<Value>>> {
    let doc = state.collection.record_view("slug", &slug)?;
    Ok(Json(SingleResponse::new(doc)))
}

/// One document by id
async fn get_handler(
    State(state): State<Arc<ResourceState>>,
    Path(id): Path<String>,
) -> RestResult<Json<SingleResponse<Value>>> {
    let doc = if state.resource.counts_views_by_id() {
        state.collection.record_view(ID_FIELD, &id)?
    } else {
        state.collection.find_one(ID_FIELD, &id)?
    };
    Ok(Json(SingleResponse::new(doc)))
}
