//! Server router definition.
//!
//! The following routes are supported:
//!
//! - ANY: `/healthz`
//! - POST: `/webhook/sentry/:channel`

use crate::{filter::ExclusionFilter, notifier::Notifier, sentry::router::sentry_router};
use axum::{routing::any, Router};
use std::sync::Arc;
use tower_http::trace::{self, TraceLayer};
use tracing::Level;

/// Dependencies shared by routes across requests. Built once at startup and
/// never mutated.
#[derive(Clone)]
pub struct Deps {
    pub notifiers: Arc<[Notifier]>,
    pub filter: Arc<ExclusionFilter>,
}

/// Instantiate a new router with tracing.
pub fn new(deps: Deps) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
        .on_response(trace::DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .merge(sentry_router())
        .layer(trace_layer)
        // Exclude the health check route from tracing.
        .route("/healthz", any(|| async { "ok" }))
        .with_state(deps)
}
