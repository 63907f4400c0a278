//! Request handler module
//!
//! Responsible for request routing dispatch and the two endpoints:
//! the landing page and the QR image.

pub mod page;
pub mod qr;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
