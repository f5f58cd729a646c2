use axum::{
    extract::{MatchedPath, Request, State},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::api::AppState;

/// GET /metrics
/// Prometheus text exposition, or 404 when the recorder is disabled.
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> Response {
    match state.prometheus_handle.as_ref() {
        Some(handle) => handle.render().into_response(),
        None => (StatusCode::NOT_FOUND, "Metrics are disabled").into_response(),
    }
}

fn outcome(status: u16) -> &'static str {
    match status {
        500.. => "error",
        400..=499 => "client_error",
        300..=399 => "redirect",
        _ => "success",
    }
}

/// Wraps every request in a `request` span and records the request counters.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string());

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
        route = route.as_deref(),
        user = tracing::field::Empty,
    );

    async move {
        let response = next.run(req).await;

        let elapsed = start.elapsed();
        let status = response.status().as_u16();

        // Raw paths carry ids; prefer the route template.
        let labels = [
            ("method", method),
            ("path", route.unwrap_or(path)),
            ("status", status.to_string()),
        ];
        metrics::counter!("http_requests_total", &labels).increment(1);
        metrics::histogram!("http_request_duration_seconds", &labels)
            .record(elapsed.as_secs_f64());

        info!(
            duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            status_code = status,
            outcome = outcome(status),
            "Request finished"
        );

        response
    }
    .instrument(span)
    .await
}

pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        "x-content-type-options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
    headers.insert("referrer-policy", HeaderValue::from_static("same-origin"));
    headers.insert(
        "content-security-policy",
        HeaderValue::from_static(
            "default-src 'self'; form-action 'self'; frame-ancestors 'none'; base-uri 'self'",
        ),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_buckets() {
        assert_eq!(outcome(200), "success");
        assert_eq!(outcome(204), "success");
        assert_eq!(outcome(303), "redirect");
        assert_eq!(outcome(404), "client_error");
        assert_eq!(outcome(503), "error");
    }
}
