//! Observability for the Studify API
//!
//! Logging goes through `tracing`. The pipeline emits `debug` events per
//! list query, the HTTP layer traces every request via `tower-http`.

mod logging;

pub use logging::{init_logging, LoggingConfig};
