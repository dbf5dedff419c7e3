//! Request logging middleware

use std::time::Instant;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tracing::{debug, debug_span, info, warn, Span};

/// Span for tower-http's trace layer; like the access log it records the
/// path only.
pub fn request_span(request: &Request) -> Span {
    debug_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path()
    )
}

/// Logs one line per request.
///
/// Only the path is recorded; the query string may carry the internal key.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    if status.is_server_error() {
        warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = %duration_ms,
            "Request failed"
        );
    } else if status == StatusCode::UNAUTHORIZED {
        warn!(
            method = %method,
            path = %path,
            duration_ms = %duration_ms,
            "Request rejected: invalid internal key"
        );
    } else if path == "/health" {
        debug!(status = status.as_u16(), duration_ms = %duration_ms, "Health check");
    } else {
        info!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = %duration_ms,
            "Request completed"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request as HttpRequest, middleware, routing::get, Router};
    use std::{
        fmt::{self, Write},
        sync::{Arc, Mutex},
    };
    use tower::ServiceExt;
    use tracing::{
        field::{Field, Visit},
        span::{Attributes, Id},
        Event, Subscriber,
    };
    use tracing_subscriber::{layer::Context, prelude::*, Layer};

    /// Records every span and event as a `name=value` line
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<String>>>);

    impl Captured {
        fn lines(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct Line(String);

    impl Visit for Line {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            let _ = write!(self.0, "{}={:?} ", field.name(), value);
        }
    }

    impl<S: Subscriber> Layer<S> for Captured {
        fn on_new_span(&self, attrs: &Attributes<'_>, _: &Id, _: Context<'_, S>) {
            let mut line = Line(String::new());
            attrs.record(&mut line);
            self.0.lock().unwrap().push(line.0);
        }

        fn on_event(&self, event: &Event<'_>, _: Context<'_, S>) {
            let mut line = Line(String::new());
            event.record(&mut line);
            self.0.lock().unwrap().push(line.0);
        }
    }

    fn router() -> Router {
        Router::new()
            .route("/health", get(|| async { "ok" }))
            .route("/teapot", get(|| async { StatusCode::IM_A_TEAPOT }))
            .route("/guarded", get(|| async { StatusCode::UNAUTHORIZED }))
            .layer(middleware::from_fn(logging_middleware))
    }

    #[tokio::test]
    async fn test_passes_response_through() {
        let ok = router()
            .oneshot(HttpRequest::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);

        let teapot = router()
            .oneshot(HttpRequest::get("/teapot?key=secret").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(teapot.status(), StatusCode::IM_A_TEAPOT);
    }

    #[tokio::test]
    async fn test_access_log_omits_query() {
        let captured = Captured::default();
        let _guard = tracing_subscriber::registry()
            .with(captured.clone())
            .set_default();

        for uri in ["/teapot?key=secret&gamemode=osu", "/guarded?key=secret"] {
            router()
                .oneshot(HttpRequest::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
        }

        let lines = captured.lines();
        assert!(lines.iter().any(|l| l.contains("path=/teapot") && l.contains("status=418")));
        assert!(lines
            .iter()
            .any(|l| l.contains("path=/guarded") && l.contains("invalid internal key")));
        assert!(lines.iter().all(|l| !l.contains("secret") && !l.contains("gamemode")));
    }

    #[test]
    fn test_request_span_omits_query() {
        let captured = Captured::default();
        let _guard = tracing_subscriber::registry()
            .with(captured.clone())
            .set_default();

        let request = HttpRequest::post("/api/difficulty/attributes?key=secret")
            .body(Body::empty())
            .unwrap();
        let _span = request_span(&request);

        let lines = captured.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("method=POST"));
        assert!(lines[0].contains("path=/api/difficulty/attributes"));
        assert!(!lines[0].contains("secret"));
    }
}
