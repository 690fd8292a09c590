//! Request logging and CORS middleware

use super::{ApiError, DEFAULT_MAX_BODY_SIZE};
use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;

const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// Largest request body echoed into the debug log
const LOGGED_BODY_LIMIT: usize = DEFAULT_MAX_BODY_SIZE;

/// Log one line per request: method, uri, status, body length and latency
///
/// With debug logging enabled, POST and PUT bodies are logged as well.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let request = if matches!(method, Method::POST | Method::PUT)
        && tracing::enabled!(tracing::Level::DEBUG)
    {
        match log_body(request).await {
            Ok(request) => request,
            Err(response) => return response,
        }
    } else {
        request
    };

    let response = next.run(request).await;

    let content_length = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = response.status().as_u16(),
        content_length = %content_length,
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "request"
    );

    response
}

/// Buffer the request body, log it, and hand back an equivalent request
async fn log_body(request: Request) -> Result<Request, Response> {
    let declared = request
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());

    if declared.is_some_and(|len| len > LOGGED_BODY_LIMIT) {
        tracing::debug!(body = "<omitted>", content_length = declared, "request body");
        return Ok(request);
    }

    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, LOGGED_BODY_LIMIT)
        .await
        .map_err(|e| {
            ApiError::BadRequest(format!("failed to read request body: {}", e)).into_response()
        })?;

    tracing::debug!(body = %String::from_utf8_lossy(&bytes), "request body");
    Ok(Request::from_parts(parts, Body::from(bytes)))
}

/// Allow cross-origin requests from anywhere
///
/// Preflight requests are answered directly and never reach a handler.
pub async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        let mut preflight = StatusCode::NO_CONTENT.into_response();
        let headers = preflight.headers_mut();
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        );
        preflight
    } else {
        next.run(request).await
    };

    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}
