//! Request ID middleware for log and error correlation.
//!
//! Accepts an upstream `x-request-id` (load balancer, proxy) or mints a UUID v4.
//! The ID is stored as a [`RequestId`] request extension for the trace span
//! and tagged on the Sentry scope. It is also echoed in the response headers.

use axum::{
    extract::Request,
    http::{Extensions, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream request ID accepted verbatim.
const MAX_UPSTREAM_ID_LEN: usize = 128;

/// Request ID attached to every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Read the ID from request extensions, or `"-"` if the middleware did not run.
    #[must_use]
    pub fn of(extensions: &Extensions) -> &str {
        extensions
            .get::<Self>()
            .map_or("-", |id| id.0.as_str())
    }
}

/// Pick the upstream ID if it is usable, otherwise mint a new one.
fn resolve_request_id(upstream: Option<&HeaderValue>) -> String {
    upstream
        .and_then(|h| h.to_str().ok())
        .filter(|s| !s.is_empty() && s.len() <= MAX_UPSTREAM_ID_LEN)
        .map_or_else(|| Uuid::new_v4().to_string(), String::from)
}

/// Middleware that ensures every request has a request ID.
///
/// Must sit outside the `TraceLayer` so the span can record the ID.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(request.headers().get(REQUEST_ID_HEADER));

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_id_is_kept() {
        let header = HeaderValue::from_static("cf-1234");
        assert_eq!(resolve_request_id(Some(&header)), "cf-1234");
    }

    #[test]
    fn test_missing_or_oversized_id_is_replaced() {
        let minted = resolve_request_id(None);
        assert!(Uuid::parse_str(&minted).is_ok());

        let long = HeaderValue::from_str(&"x".repeat(MAX_UPSTREAM_ID_LEN + 1)).unwrap();
        let replaced = resolve_request_id(Some(&long));
        assert!(Uuid::parse_str(&replaced).is_ok());

        let empty = HeaderValue::from_static("");
        assert!(Uuid::parse_str(&resolve_request_id(Some(&empty))).is_ok());
    }
}
