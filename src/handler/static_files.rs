//! Static file serving module
//!
//! Serves assets verbatim from the configured directory with MIME type
//! detection. Anything outside the asset root is a miss, never an error.

use crate::config::AppState;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// Serve a static asset, or `None` when the path does not resolve to one
pub async fn serve(state: &AppState, path: &str, is_head: bool) -> Option<Response<Full<Bytes>>> {
    let (content, content_type) = load_asset(&state.config.site.static_dir, path).await?;
    Some(http::file_response(content, content_type, is_head))
}

/// Load an asset from the static directory
///
/// The request path is stripped of traversal segments and the resolved
/// file must stay inside the asset root.
pub async fn load_asset(static_dir: &str, path: &str) -> Option<(Vec<u8>, &'static str)> {
    // Remove leading slash and prevent directory traversal
    let clean_path = path.trim_start_matches('/').replace("..", "");
    if clean_path.is_empty() {
        return None;
    }

    let file_path = Path::new(static_dir).join(&clean_path);

    let static_dir_canonical = match Path::new(static_dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static directory not found or inaccessible '{static_dir}': {e}"
            ));
            return None;
        }
    };

    // File not found is common (404), no need to log at warning level
    let Ok(file_path_canonical) = file_path.canonicalize() else {
        return None;
    };
    if !file_path_canonical.starts_with(&static_dir_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            file_path_canonical.display()
        ));
        return None;
    }
    if !file_path_canonical.is_file() {
        return None;
    }

    let content = match fs::read(&file_path_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path_canonical.display(),
                e
            ));
            return None;
        }
    };

    let content_type =
        mime::get_content_type(file_path_canonical.extension().and_then(|e| e.to_str()));

    Some((content, content_type))
}
