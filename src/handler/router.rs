//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. Dispatch is an exact match
//! on (method, path): the page table first, then the contact form, then
//! static assets, then the rendered 404 page. Each request is stateless
//! and independent.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::site::{contact, pages};
use chrono::Local;
use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let http_version = version_label(req.version());
    let is_head = method == Method::HEAD;

    let referer = header_string(&req, "referer");
    let user_agent = header_string(&req, "user-agent");

    // Reject oversized bodies before reading them
    let response = if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        resp
    } else {
        let (content_type, body) = read_body(req, &method).await;
        dispatch(
            &method,
            &path,
            is_head,
            content_type.as_deref(),
            body.as_deref(),
            &state,
        )
        .await
    };

    if state.config.logging.access_log {
        let entry = AccessLogEntry {
            remote_addr: peer_addr.ip().to_string(),
            time: Local::now(),
            method: method.to_string(),
            path,
            query,
            http_version,
            status: response.status().as_u16(),
            body_bytes: response.body().size_hint().exact().unwrap_or(0),
            referer,
            user_agent,
            request_time_us: u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
        };
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route a request to its handler
///
/// Only POST /contact carries a body; everything else is a page, a
/// static asset, or a miss.
async fn dispatch(
    method: &Method,
    path: &str,
    is_head: bool,
    content_type: Option<&str>,
    body: Option<&[u8]>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    match *method {
        Method::GET | Method::HEAD => {
            if let Some(page) = pages::find(path) {
                return pages::render_page(state, page, is_head);
            }
            if let Some(response) = static_files::serve(state, path, is_head).await {
                return response;
            }
            pages::render_not_found(state, is_head)
        }
        Method::POST if path == "/contact" => {
            contact::handle_submission(content_type, body.unwrap_or_default())
        }
        _ => pages::render_not_found(state, is_head),
    }
}

/// Collect the request body for POST requests
///
/// GET/HEAD bodies are ignored. A failed read is treated as an empty
/// body and rejected downstream by validation.
async fn read_body(
    req: Request<hyper::body::Incoming>,
    method: &Method,
) -> (Option<String>, Option<Bytes>) {
    if *method != Method::POST {
        return (None, None);
    }

    let content_type = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    use http_body_util::BodyExt;
    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            Bytes::new()
        }
    };

    (content_type, Some(body))
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

fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;
    use hyper::StatusCode;

    fn test_state() -> Arc<AppState> {
        let cfg = Config::load_from("no-such-config").expect("defaults");
        Arc::new(AppState::new(cfg).expect("templates and data load from crate root"))
    }

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    #[tokio::test]
    async fn test_get_routes_return_pages() {
        let state = test_state();
        for (path, title) in [
            ("/", "Home"),
            ("/about", "About Me"),
            ("/projects", "Projects"),
            ("/skills", "Skills"),
            ("/contact", "Contact"),
        ] {
            let response = dispatch(&Method::GET, path, false, None, None, &state).await;
            assert_eq!(response.status(), StatusCode::OK, "path {path}");
            assert!(body_string(response).await.contains(title), "path {path}");
        }
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let state = test_state();
        let response = dispatch(&Method::GET, "/no-such-page", false, None, None, &state).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_string(response).await.contains("404"));
    }

    #[tokio::test]
    async fn test_post_to_page_path_is_404() {
        let state = test_state();
        let response = dispatch(&Method::POST, "/about", false, None, None, &state).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unsupported_method_is_404() {
        let state = test_state();
        let response = dispatch(&Method::PUT, "/contact", false, None, None, &state).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_post_contact_dispatches_to_form_handler() {
        let state = test_state();
        let response = dispatch(
            &Method::POST,
            "/contact",
            false,
            Some("application/x-www-form-urlencoded"),
            Some(b"name=Jane&email=j%40e.com&message=Hi"),
            &state,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("\"success\":true"));
    }

    #[tokio::test]
    async fn test_static_asset_is_served() {
        let state = test_state();
        let response = dispatch(&Method::GET, "/css/style.css", false, None, None, &state).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("Content-Type").unwrap(), "text/css");
    }

    #[test]
    fn test_version_label() {
        assert_eq!(version_label(Version::HTTP_11), "1.1");
        assert_eq!(version_label(Version::HTTP_10), "1.0");
        assert_eq!(version_label(Version::HTTP_2), "2");
    }
}
