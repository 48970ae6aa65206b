//! # Static Assets
//!
//! Front-end files served from the public directory, after every `/api` route has had its chance.
//!
//! - `/` resolves to `index.html`
//! - Content type is picked from the file extension
//! - A decoded path with a `..` segment is refused with 403 before it touches the filesystem
use std::path::Path;

use axum::{
    Router,
    extract::Request,
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    middleware::{Next, from_fn},
    response::{IntoResponse, Response},
};
use tower_http::services::ServeDir;
use tracing::warn;

pub fn router(public_dir: &Path) -> Router {
    let files = ServeDir::new(public_dir)
        .append_index_html_on_directories(true)
        .not_found_service(not_found.into_service());

    Router::new()
        .fallback_service(files)
        .layer(from_fn(reject_traversal))
}

async fn reject_traversal(request: Request, next: Next) -> Response {
    if escapes_root(request.uri().path()) {
        warn!("Rejected static path {}", request.uri().path());
        return (StatusCode::FORBIDDEN, "Forbidden").into_response();
    }

    next.run(request).await
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

fn escapes_root(path: &str) -> bool {
    let Ok(decoded) = urlencoding::decode(path) else {
        return true;
    };

    decoded
        .split(['/', '\\'])
        .any(|segment| segment == "..")
}
