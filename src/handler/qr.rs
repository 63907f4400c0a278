//! QR image handler
//!
//! Streams the current bytes of the externally written QR PNG. The file
//! is owned by the bot session manager and may change or disappear
//! between any two requests, so every request re-reads it from disk and
//! nothing is cached server-side.

use crate::handler::router::RequestContext;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// Serve the QR image endpoint
pub async fn serve_qr_image(ctx: &RequestContext, image_path: &str) -> Response<Full<Bytes>> {
    match load_qr_image(image_path).await {
        Ok(Some(data)) => {
            if ctx.access_log {
                logger::log_response(200, data.len());
            }
            http::build_png_response(data, ctx.is_head)
        }
        Ok(None) => http::build_404_response("QR code not found"),
        Err(e) => {
            logger::log_error(&format!("Failed to read QR image '{image_path}': {e}"));
            http::build_500_response("Failed to read QR code")
        }
    }
}

/// Read the whole QR file. `None` means it does not exist right now.
pub async fn load_qr_image(image_path: &str) -> std::io::Result<Option<Vec<u8>>> {
    if !Path::new(image_path).exists() {
        return Ok(None);
    }

    match fs::read(image_path).await {
        Ok(content) => Ok(Some(content)),
        // Lost a race with the external writer between the existence
        // check and the read
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_image_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("qr_viewer_{}_{name}.png", std::process::id()))
    }

    #[tokio::test]
    async fn test_load_returns_exact_file_bytes() {
        let path = temp_image_path("exact_bytes");
        let png_header = b"\x89PNG\r\n\x1a\n";
        std::fs::write(&path, png_header).expect("write temp file");

        let loaded = load_qr_image(path.to_str().expect("utf-8 path"))
            .await
            .expect("read succeeds")
            .expect("file exists");
        assert_eq!(loaded, png_header);

        std::fs::remove_file(&path).expect("cleanup");
    }

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let path = temp_image_path("missing");
        let loaded = load_qr_image(path.to_str().expect("utf-8 path"))
            .await
            .expect("missing file is not an error");
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_content_change_is_observed() {
        let path = temp_image_path("content_change");
        let path_str = path.to_str().expect("utf-8 path");

        std::fs::write(&path, b"first qr").expect("write temp file");
        let first = load_qr_image(path_str).await.expect("read").expect("exists");
        assert_eq!(first, b"first qr");

        std::fs::write(&path, b"second qr").expect("rewrite temp file");
        let second = load_qr_image(path_str).await.expect("read").expect("exists");
        assert_eq!(second, b"second qr");

        std::fs::remove_file(&path).expect("cleanup");
        let gone = load_qr_image(path_str).await.expect("read");
        assert!(gone.is_none());
    }
}
