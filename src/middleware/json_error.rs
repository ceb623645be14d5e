use axum::{
    body::to_bytes,
    extract::Request,
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::response::Envelope;

const MAX_ERROR_BODY_BYTES: usize = 16 * 1024;
const PASSTHROUGH_CONTENT_TYPES: [&str; 3] = ["application/json", "+json", "text/html"];

/// Rewrites plain-text framework errors (unknown route, wrong method, body
/// limits) into the todo envelope, keeping their status code.
///
/// Responses that already carry JSON or HTML, and requests from browsers
/// asking for HTML, are left alone.
pub async fn json_error_middleware(req: Request, next: Next) -> Response {
    let wants_html = header_contains(req.headers(), header::ACCEPT, &["text/html"]);
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let response = next.run(req).await;

    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }
    if wants_html || header_contains(response.headers(), header::CONTENT_TYPE, &PASSTHROUGH_CONTENT_TYPES) {
        return response;
    }

    let (parts, body) = response.into_parts();
    let error = match to_bytes(body, MAX_ERROR_BODY_BYTES).await {
        Ok(bytes) => {
            let text = String::from_utf8_lossy(&bytes).trim().to_string();
            if text.is_empty() { reason(status) } else { text }
        }
        Err(_) => reason(status),
    };
    if status.is_server_error() {
        tracing::error!(%method, %path, %status, %error, "request failed");
    } else {
        tracing::debug!(%method, %path, %status, %error, "request rejected");
    }

    let mut rewritten = Envelope::<()>::failure(reason(status), error)
        .with_status(status)
        .into_response();
    for (name, value) in &parts.headers {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rewritten.headers_mut().insert(name.clone(), value.clone());
        }
    }
    rewritten
}

fn header_contains(headers: &HeaderMap, name: header::HeaderName, needles: &[&str]) -> bool {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            let value = value.to_ascii_lowercase();
            needles.iter().any(|needle| value.contains(needle))
        })
        .unwrap_or(false)
}

fn reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}
