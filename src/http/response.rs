//! HTTP response building module
//!
//! Provides builders for the status codes this server can produce.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build 404 Not Found response with a descriptive plain-text body
pub fn build_404_response(message: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from_static(message.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from_static(message.as_bytes())))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS");

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, HEAD, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(413)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("413 Payload Too Large")))
        .unwrap_or_else(|e| {
            log_build_error("413", &e);
            Response::new(Full::new(Bytes::from("413 Payload Too Large")))
        })
}

/// Build 500 Internal Server Error response
pub fn build_500_response(message: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from_static(message.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from_static(message.as_bytes())))
        })
}

/// Build health check response
pub fn build_health_response(status: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", "text/plain")
        .header("Content-Length", status.len())
        .body(Full::new(Bytes::from_static(status.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error("health", &e);
            Response::new(Full::new(Bytes::from_static(status.as_bytes())))
        })
}

/// Build the landing page response
pub fn build_html_response(content: &'static str, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from_static(content.as_bytes())
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build the QR image response.
///
/// The no-cache header triple keeps browsers and intermediaries from
/// ever serving a stale QR code; the client polls this endpoint with a
/// cache-busting query string on top of that.
pub fn build_png_response(data: Vec<u8>, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(data)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "image/png")
        .header("Content-Length", content_length)
        .header("Cache-Control", "no-cache, no-store, must-revalidate")
        .header("Pragma", "no-cache")
        .header("Expires", "0")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_bytes(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes()
    }

    #[tokio::test]
    async fn test_png_response_has_no_cache_headers() {
        let resp = build_png_response(vec![1, 2, 3], false);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "image/png");
        assert_eq!(
            resp.headers()["Cache-Control"],
            "no-cache, no-store, must-revalidate"
        );
        assert_eq!(resp.headers()["Pragma"], "no-cache");
        assert_eq!(resp.headers()["Expires"], "0");
        assert_eq!(body_bytes(resp).await.as_ref(), &[1, 2, 3]);
    }

    #[tokio::test]
    async fn test_png_response_head_has_empty_body() {
        let resp = build_png_response(vec![1, 2, 3], true);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Length"], "3");
        assert!(body_bytes(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_404_response() {
        let resp = build_404_response("QR code not found");
        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers()["Content-Type"], "text/plain");
        assert_eq!(body_bytes(resp).await.as_ref(), b"QR code not found");
    }

    #[test]
    fn test_405_response_lists_allowed_methods() {
        let resp = build_405_response();
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers()["Allow"], "GET, HEAD, OPTIONS");
    }

    #[test]
    fn test_options_response_cors() {
        let resp = build_options_response(true);
        assert_eq!(resp.status(), 204);
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");

        let resp = build_options_response(false);
        assert!(!resp.headers().contains_key("Access-Control-Allow-Origin"));
    }

    #[test]
    fn test_html_response_content_type() {
        let resp = build_html_response("<html></html>", false);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "text/html; charset=utf-8");
    }

    #[test]
    fn test_500_response() {
        let resp = build_500_response("Failed to read QR code");
        assert_eq!(resp.status(), 500);
    }
}
