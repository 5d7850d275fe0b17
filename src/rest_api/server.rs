//! # REST API HTTP Server
//!
//! Axum-based HTTP server combining every resource router.
//!
//! Middleware, outermost first: request tracing, CORS, security headers,
//! gzip compression.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue, Method, StatusCode};
use axum::{routing::get, Json, Router};
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::errors::{RestError, RestResult};
use super::handler::{resource_routes, ResourceState};
use super::response::HealthResponse;
use crate::config::{HttpServerConfig, StudifyConfig};
use crate::resource::Resource;
use crate::store::Catalog;

/// HTTP server for the content API
pub struct RestServer {
    config: HttpServerConfig,
    router: Router,
}

impl RestServer {
    pub fn new(catalog: &Catalog, config: &StudifyConfig) -> RestResult<Self> {
        let router = Self::build_router(catalog, config)?;
        Ok(Self {
            config: config.server.clone(),
            router,
        })
    }

    /// Build the combined router with all endpoints
    fn build_router(catalog: &Catalog, config: &StudifyConfig) -> RestResult<Router> {
        let mut router = Router::new().route("/api/health", get(health_handler));

        for resource in Resource::ALL {
            let state = Arc::new(ResourceState {
                resource,
                collection: catalog.collection(resource)?,
                max_limit: config.query.max_limit,
            });
            router = router.merge(resource_routes(state));
        }

        let mut router = router
            .fallback(not_found_handler)
            .layer(CompressionLayer::new());
        for (name, value) in security_headers() {
            router = router.layer(SetResponseHeaderLayer::if_not_present(name, value));
        }

        Ok(router
            .layer(cors_layer(&config.server))
            .layer(TraceLayer::new_for_http()))
    }

    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "studify api listening");
        for resource in Resource::ALL {
            info!(resource = %resource, path = resource.mount_path(), "mounted");
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("server stopped");
        Ok(())
    }
}

/// Headers set on every response unless a handler already set them
fn security_headers() -> [(HeaderName, HeaderValue); 12] {
    [
        (
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(
                "default-src 'self';base-uri 'self';font-src 'self' https: data:;\
                 form-action 'self';frame-ancestors 'self';img-src 'self' data:;\
                 object-src 'none';script-src 'self';script-src-attr 'none';\
                 style-src 'self' https: 'unsafe-inline';upgrade-insecure-requests",
            ),
        ),
        (
            HeaderName::from_static("cross-origin-opener-policy"),
            HeaderValue::from_static("same-origin"),
        ),
        (
            HeaderName::from_static("cross-origin-resource-policy"),
            HeaderValue::from_static("same-origin"),
        ),
        (
            HeaderName::from_static("origin-agent-cluster"),
            HeaderValue::from_static("?1"),
        ),
        (header::REFERRER_POLICY, HeaderValue::from_static("no-referrer")),
        (
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=15552000; includeSubDomains"),
        ),
        (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        (header::X_DNS_PREFETCH_CONTROL, HeaderValue::from_static("off")),
        (
            HeaderName::from_static("x-download-options"),
            HeaderValue::from_static("noopen"),
        ),
        (header::X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN")),
        (
            HeaderName::from_static("x-permitted-cross-domain-policies"),
            HeaderValue::from_static("none"),
        ),
        (header::X_XSS_PROTECTION, HeaderValue::from_static("0")),
    ]
}

/// Configured origins may send credentials; an empty list allows any
/// origin without them
fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
}

async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    (StatusCode::OK, Json(HealthResponse::ok()))
}

async fn not_found_handler() -> RestError {
    RestError::NotFound("Route not found".to_string())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
