//! # Response Mapping Middleware
//!
//! Normalizes response headers after the handler has run.
//!
//! - Responses from `/auth/*` (which may carry access tokens) get
//!   `Cache-Control: no-store`.
//! - Server errors are logged with the request ID.

use super::mw_logging::is_sensitive_path;
use super::mw_req_stamp::RequestStamp;
use axum::{
    extract::Request,
    http::{header::CACHE_CONTROL, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::error;

/// Response mapping middleware.
pub async fn map_res(req: Request, next: Next) -> Response {
    let no_store = is_sensitive_path(req.uri().path());
    let request_id = req.extensions().get::<RequestStamp>().map(|s| s.id.clone());

    let mut res = next.run(req).await;

    if no_store {
        res.headers_mut()
            .insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }

    if res.status().is_server_error() {
        error!(
            request_id = ?request_id,
            "[RESPONSE] Server error: {}",
            res.status()
        );
    }

    res
}
