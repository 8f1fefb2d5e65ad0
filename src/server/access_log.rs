use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue, Version, header::USER_AGENT},
    middleware::Next,
    response::Response,
};
use base64::Engine as _;
use rand::RngCore;
use std::time::Instant;
use tracing::{error, info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(generate_request_id, str::to_string)
}

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

/// One log line per request; the request id is echoed in `x-request-id`.
pub async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let protocol = format_http_version(req.version());
    let request_id = request_id(req.headers());
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status();
    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    macro_rules! log_request {
        ($level:ident) => {
            $level!(
                status = status.as_u16(),
                request_id = %request_id,
                method = %method,
                protocol,
                path = %path,
                latency_ms,
                user_agent = %user_agent,
                "request handled"
            )
        };
    }

    if status.is_server_error() {
        log_request!(error);
    } else if status.is_client_error() {
        log_request!(warn);
    } else {
        log_request!(info);
    }

    resp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_is_reused_when_sane() {
        let mut headers = HeaderMap::new();
        headers.insert(X_REQUEST_ID, HeaderValue::from_static("abc-123"));
        assert_eq!(request_id(&headers), "abc-123");
    }

    #[test]
    fn request_id_is_generated_when_missing_or_oversized() {
        assert_eq!(request_id(&HeaderMap::new()).len(), 16);

        let mut headers = HeaderMap::new();
        let long = "x".repeat(MAX_REQUEST_ID_LEN + 1);
        headers.insert(X_REQUEST_ID, HeaderValue::from_str(&long).expect("ascii"));
        assert_ne!(request_id(&headers), long);
    }
}
