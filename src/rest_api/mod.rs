//! # Studify REST API Module
//!
//! Read endpoints for every content resource. List endpoints run the
//! list-query pipeline against the resource's collection.

pub mod errors;
pub mod handler;
pub mod response;
pub mod server;

pub use errors::{RestError, RestResult};
pub use handler::{resource_routes, ResourceState, FEATURED_LIMIT};
pub use response::{HealthResponse, ListResponse, SingleResponse};
pub use server::RestServer;
