//! HTTP protocol layer module
//!
//! Response builders and MIME detection, decoupled from the site's
//! business logic.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{build_413_response, file_response, html_response, json_response};
