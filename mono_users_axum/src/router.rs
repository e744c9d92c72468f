//! Router for the user account endpoints

use axum::Router;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Create the router for the user account endpoints
///
/// Mount it under [`crate::MONO_USERS_ROUTE_PREFIX`]. The endpoints are:
/// - `GET /` and `POST /`
/// - `GET /{id}`, `PUT /{id}` and `DELETE /{id}`
/// - `GET /by-userid/{user_id}`
pub fn users_router() -> Router {
    super::users::router().layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as [`users_router`] without the HTTP tracing middleware
pub fn users_router_no_trace() -> Router {
    super::users::router()
}
