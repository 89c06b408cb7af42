//! Request handler module
//!
//! Responsible for request routing dispatch and business logic processing:
//! template-rendered pages, the contact form, and static assets.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
