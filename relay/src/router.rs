use axum::{extract::Request, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{controller::callback, state::RelayState};

/// Routes served by the relay.
///
/// The redirect URI registered with osu! points at `/register/`; `/` is kept for
/// deployments that mount the relay under that path prefix.
pub fn router() -> Router<RelayState> {
    Router::new()
        .route("/", get(callback))
        .route("/register/", get(callback))
        // Spans carry the path only, the query string holds the authorization code.
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
}
