//! Landing page handler
//!
//! Serves the fixed HTML page that polls the QR image endpoint.

use crate::handler::router::RequestContext;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Fixed template; no request data is ever interpolated
const LANDING_PAGE: &str = include_str!("../../static/index.html");

/// Serve the landing page
pub fn serve_page(ctx: &RequestContext) -> Response<Full<Bytes>> {
    if ctx.access_log {
        logger::log_response(200, LANDING_PAGE.len());
    }
    http::build_html_response(LANDING_PAGE, ctx.is_head)
}
