//! Page table and template rendering
//!
//! Maps each GET page to a template and a context, and owns the rendered
//! 404/500 pages. The template engine is consumed as an opaque
//! `render(name, context)` capability; its failures surface through the
//! 500 path.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use tera::Context;

use crate::config::AppState;
use crate::http;
use crate::logger;

/// A static-content page served by the site
pub struct Page {
    pub path: &'static str,
    pub template: &'static str,
    pub title: &'static str,
    /// Whether the project list is inserted into the context
    pub with_projects: bool,
}

/// Every GET page, matched by exact path
pub const PAGES: &[Page] = &[
    Page {
        path: "/",
        template: "index.html",
        title: "Home",
        with_projects: false,
    },
    Page {
        path: "/about",
        template: "about.html",
        title: "About Me",
        with_projects: false,
    },
    Page {
        path: "/projects",
        template: "projects.html",
        title: "Projects",
        with_projects: true,
    },
    Page {
        path: "/skills",
        template: "skills.html",
        title: "Skills",
        with_projects: false,
    },
    Page {
        path: "/contact",
        template: "contact.html",
        title: "Contact",
        with_projects: false,
    },
];

/// Look up a page by exact path
pub fn find(path: &str) -> Option<&'static Page> {
    PAGES.iter().find(|p| p.path == path)
}

/// Render a page from the table
///
/// A fresh context is built per request: the title, plus the project
/// list for pages that need it. Render failures fall through to the
/// 500 page.
pub fn render_page(state: &AppState, page: &Page, is_head: bool) -> Response<Full<Bytes>> {
    let mut context = Context::new();
    context.insert("title", page.title);
    if page.with_projects {
        context.insert("projects", &state.projects);
    }

    match state.templates.render(page.template, &context) {
        Ok(html) => http::html_response(StatusCode::OK, html, is_head),
        Err(e) => render_server_error(state, &e.to_string(), is_head),
    }
}

/// Render the 404 page
///
/// Falls back to plain text if the 404 template itself cannot render.
pub fn render_not_found(state: &AppState, is_head: bool) -> Response<Full<Bytes>> {
    let mut context = Context::new();
    context.insert("title", "404 - Page Not Found");

    match state.templates.render("404.html", &context) {
        Ok(html) => http::html_response(StatusCode::NOT_FOUND, html, is_head),
        Err(e) => {
            logger::log_error(&format!("Failed to render 404 page: {e}"));
            http::html_response(StatusCode::NOT_FOUND, "404 Not Found".to_string(), is_head)
        }
    }
}

/// Render the 500 page with the error message embedded
///
/// Never fails: if the 500 template cannot render either, a plain-text
/// body carrying the message is returned instead.
pub fn render_server_error(
    state: &AppState,
    message: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    logger::log_error(&format!("Handler error: {message}"));

    let mut context = Context::new();
    context.insert("title", "500 - Server Error");
    context.insert("error", message);

    match state.templates.render("500.html", &context) {
        Ok(html) => http::html_response(StatusCode::INTERNAL_SERVER_ERROR, html, is_head),
        Err(e) => {
            logger::log_error(&format!("Failed to render 500 page: {e}"));
            http::html_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("500 Internal Server Error: {message}"),
                is_head,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;

    fn test_state() -> AppState {
        let cfg = Config::load_from("no-such-config").expect("defaults");
        AppState::new(cfg).expect("templates and data load from crate root")
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

    #[test]
    fn test_page_table_lookup() {
        assert_eq!(find("/").expect("home").title, "Home");
        assert_eq!(find("/about").expect("about").title, "About Me");
        assert_eq!(find("/projects").expect("projects").title, "Projects");
        assert_eq!(find("/skills").expect("skills").title, "Skills");
        assert_eq!(find("/contact").expect("contact").title, "Contact");
        assert!(find("/missing").is_none());
        assert!(find("/about/").is_none(), "matching is exact");
    }

    #[tokio::test]
    async fn test_all_pages_render_with_title() {
        let state = test_state();
        for page in PAGES {
            let response = render_page(&state, page, false);
            assert_eq!(response.status(), StatusCode::OK, "page {}", page.path);
            let content_type = response
                .headers()
                .get("Content-Type")
                .expect("content type")
                .to_str()
                .expect("ascii header");
            assert!(content_type.starts_with("text/html"), "page {}", page.path);
            let body = body_string(response).await;
            assert!(body.contains(page.title), "page {} missing title", page.path);
        }
    }

    #[tokio::test]
    async fn test_projects_page_lists_every_entry() {
        let state = test_state();
        let expected = state.projects.len();
        let page = find("/projects").expect("projects page");

        let body = body_string(render_page(&state, page, false)).await;
        assert_eq!(body.matches("class=\"project-card\"").count(), expected);
        for project in &state.projects {
            assert!(body.contains(&project.name));
        }
    }

    #[tokio::test]
    async fn test_head_renders_empty_body() {
        let state = test_state();
        let page = find("/").expect("home page");

        let response = render_page(&state, page, true);
        assert_eq!(response.status(), StatusCode::OK);
        let length: usize = response
            .headers()
            .get("Content-Length")
            .expect("content length")
            .to_str()
            .expect("ascii header")
            .parse()
            .expect("numeric length");
        assert!(length > 0, "HEAD keeps the GET Content-Length");
        assert!(body_string(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_template_becomes_500_with_message() {
        let state = test_state();
        let bad = Page {
            path: "/broken",
            template: "no-such-template.html",
            title: "Broken",
            with_projects: false,
        };

        let response = render_page(&state, &bad, false);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_string(response).await;
        assert!(
            body.contains("no-such-template.html"),
            "error message should name the template: {body}"
        );
    }

    #[tokio::test]
    async fn test_not_found_page() {
        let state = test_state();
        let response = render_not_found(&state, false);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_string(response).await;
        assert!(body.contains("404"));
    }
}
