//! studify - content API for the Studify learning platform
//!
//! List endpoints translate a URL querystring into a filter, sort order,
//! field projection and page window, run it against a document collection
//! and return the page with its pagination envelope.

pub mod cli;
pub mod config;
pub mod observability;
pub mod query;
pub mod resource;
pub mod rest_api;
pub mod store;
