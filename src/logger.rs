//! Logger module
//!
//! Timestamped stdout/stderr logging for server lifecycle, access and
//! error events.

use chrono::Utc;
use hyper::{Method, Uri, Version};
use std::net::SocketAddr;

use crate::config::Config;

fn timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("QR viewer server started");
    println!("Listening on: http://{addr}");
    println!("QR image path: {}", config.qr.image_path);
    println!("Log level: {}", config.logging.level);
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("Using Tokio runtime for concurrency");
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[{}] [Connection] Accepted from: {peer_addr}", timestamp());
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!(
        "[{}] [ERROR] Failed to serve connection: {err:?}",
        timestamp()
    );
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    println!("[{}] [Request] {method} {uri} {version:?}", timestamp());
}

pub fn log_response(status: u16, size: usize) {
    println!("[{}] [Response] {status} ({size} bytes)", timestamp());
}

pub fn log_headers_count(count: usize, show: bool) {
    if show {
        println!("[Headers] Count: {count}");
    }
}

pub fn log_error(message: &str) {
    eprintln!("[{}] [ERROR] {message}", timestamp());
}

pub fn log_warning(message: &str) {
    eprintln!("[{}] [WARN] {message}", timestamp());
}

pub fn log_shutdown_started() {
    println!("\n[Shutdown] Stopping accept loop, draining connections...");
}

pub fn log_shutdown_complete() {
    println!("[Shutdown] Server stopped.");
}
