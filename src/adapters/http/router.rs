//! Top-level router with the cross-cutting tower-http layers.

use std::time::Duration;

use axum::Router;
use http::HeaderValue;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

use super::conversation::{conversation_router, ConversationAppState};

/// Builds the service router: conversation routes plus request tracing,
/// a per-request time bound and CORS. An empty origin list allows any
/// origin.
pub fn app_router(
    state: ConversationAppState,
    request_timeout: Duration,
    cors_origins: &[String],
) -> Router {
    conversation_router()
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}
