//! Sentry webhook handler.
//!
//! The following routes are supported:
//!
//! - POST: `/webhook/sentry/:channel`

use super::{payload::HookPayload, Summary};
use crate::{error::DispatchFailure, router::Deps, slack::channel::ChannelId};
use axum::{
    body::{self, Body},
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use tracing::{debug, error};

/// Sentry payloads are a few kilobytes, anything near this is bogus.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Instantiate the Sentry routes. The bare prefix is routed too so that a
/// missing channel can be reported.
pub fn sentry_router() -> Router<Deps> {
    Router::new()
        .route("/webhook/sentry/", post(webhook_handler))
        .route("/webhook/sentry/*path", post(webhook_handler))
}

/// Handler for POST `/webhook/sentry/:channel`.
///
/// The last path segment is the channel to post in. Accepts a [HookPayload]
/// in JSON format, which is summarised and sent to every configured platform.
async fn webhook_handler(State(deps): State<Deps>, uri: Uri, body: Body) -> Response {
    let channel = match channel_from_path(uri.path()) {
        Some(x) => x,
        None => return (StatusCode::BAD_REQUEST, "empty channel ID").into_response(),
    };

    let bytes = match body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(x) => x,
        Err(e) => {
            error!("Could not read request body: {}", e);
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    debug!(
        body = %String::from_utf8_lossy(&bytes),
        "Read request payload"
    );

    // Malformed payloads are a 500, not a 4xx.
    let hook: HookPayload = match serde_json::from_slice(&bytes) {
        Ok(x) => x,
        Err(e) => {
            error!("Could not parse webhook payload: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    debug!(?hook, "Parsed webhook payload");

    let summary = Summary::new(&hook, &deps.filter);

    match dispatch(&deps, &channel, &summary).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => {
            error!(%channel, issue = %hook.id, "Error while posting message: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Send the summary to every platform in turn, collecting rather than
/// stopping at failures.
async fn dispatch(deps: &Deps, channel: &ChannelId, summary: &Summary) -> Result<(), DispatchFailure> {
    let mut failures = Vec::new();

    for notifier in deps.notifiers.iter() {
        if let Err(e) = notifier.send(channel, summary).await {
            failures.push((notifier.name(), e));
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(DispatchFailure(failures))
    }
}

/// The last segment of the path, if it isn't empty.
///
/// ```
/// assert_eq!(channel_from_path("/webhook/sentry/C123"), Some(ChannelId("C123".into())));
/// assert_eq!(channel_from_path("/webhook/sentry/"), None);
/// ```
fn channel_from_path(path: &str) -> Option<ChannelId> {
    path.rsplit('/')
        .next()
        .filter(|x| !x.is_empty())
        .map(|x| ChannelId(x.to_owned()))
}
