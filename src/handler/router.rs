//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method
//! validation, route matching, and dispatching.

use crate::config::{AppState, HealthConfig};
use crate::handler::{page, qr};
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext {
    pub is_head: bool,
    pub access_log: bool,
}

/// Resolved route for a request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    LandingPage,
    QrImage,
    Liveness,
    Readiness,
    NotFound,
}

/// Explicit route table, evaluated in order against the request path.
///
/// The query string never participates in matching; the QR endpoint's
/// query string exists purely so browsers bypass their own cache.
pub fn match_route(path: &str, health: &HealthConfig) -> Route {
    if health.enabled {
        if path == health.liveness_path {
            return Route::Liveness;
        }
        if path == health.readiness_path {
            return Route::Readiness;
        }
    }

    if path == "/" {
        return Route::LandingPage;
    }

    if path.starts_with("/qr.png") {
        return Route::QrImage;
    }

    Route::NotFound
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let uri = req.uri();
    let path = uri.path();
    let is_head = *method == Method::HEAD;

    let access_log = state.access_log;
    if access_log {
        logger::log_request(method, uri, req.version());
    }

    // 1. Check HTTP method
    if let Some(resp) = check_http_method(method, state.config.http.enable_cors) {
        return Ok(resp);
    }

    // 2. Check body size
    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return Ok(resp);
    }

    // 3. Log headers if enabled
    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    let ctx = RequestContext {
        is_head,
        access_log,
    };

    // 4. Dispatch
    let response = match match_route(path, &state.config.health) {
        Route::Liveness | Route::Readiness => http::build_health_response("ok"),
        Route::LandingPage => page::serve_page(&ctx),
        Route::QrImage => qr::serve_qr_image(&ctx, &state.config.qr.image_path).await,
        Route::NotFound => http::build_404_response("404 Not Found"),
    };

    Ok(response)
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}
