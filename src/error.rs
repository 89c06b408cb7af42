//! Startup error taxonomy
//!
//! Errors that can abort the process before it starts serving requests.
//! Request-time failures never use these; they are handled in place and
//! surfaced as rendered error pages.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to load templates: {0}")]
    Templates(#[from] tera::Error),

    #[error("failed to read project data '{path}': {source}")]
    ProjectData {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid project data '{path}': {source}")]
    ProjectParse {
        path: String,
        source: serde_json::Error,
    },
}
