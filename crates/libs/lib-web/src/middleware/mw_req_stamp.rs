//! # Request Stamping Middleware
//!
//! Gives every request an ID for log correlation.
//!
//! An `X-Request-ID` sent by a trusted proxy is reused when it looks sane;
//! otherwise a UUID v4 is generated. The ID is echoed on the response.
//!
//! Handlers can read it via `Extension<RequestStamp>`.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Longest inbound request ID that is reused.
const MAX_INBOUND_ID_LEN: usize = 64;

/// Request metadata for tracing and debugging.
#[derive(Clone, Debug)]
pub struct RequestStamp {
    /// Unique request identifier
    pub id: String,
}

fn inbound_id(req: &Request) -> Option<String> {
    let id = req.headers().get(&REQUEST_ID_HEADER)?.to_str().ok()?;

    let sane = !id.is_empty()
        && id.len() <= MAX_INBOUND_ID_LEN
        && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    sane.then(|| id.to_string())
}

/// Request stamping middleware.
///
/// Adds a [`RequestStamp`] to the request extensions and the ID to the
/// `X-Request-ID` response header.
pub async fn stamp_req(mut req: Request, next: Next) -> Response {
    let id = inbound_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string());
    let stamp = RequestStamp { id };

    req.extensions_mut().insert(stamp.clone());

    let mut res = next.run(req).await;

    if let Ok(header_value) = HeaderValue::from_str(&stamp.id) {
        res.headers_mut().insert(REQUEST_ID_HEADER.clone(), header_value);
    }

    res
}
