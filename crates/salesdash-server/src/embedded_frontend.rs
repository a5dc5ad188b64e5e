//! Embedded frontend assets for the salesdash server.
//!
//! The dashboard page, its script and stylesheet are compiled into the
//! binary. Only available when the `embedded-frontend` feature is enabled.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;

/// Embedded frontend assets.
#[derive(Embed)]
#[folder = "src/frontend/"]
pub struct FrontendAssets;

/// Serve an embedded frontend file.
pub fn serve_static(path: String) -> Response {
    let path = path.strip_prefix('/').map(|s| s.to_string()).unwrap_or(path);

    match FrontendAssets::get(&path) {
        Some(content) => {
            let mime = mime_guess::from_path(&path)
                .first_or_octet_stream()
                .to_string();

            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, mime),
                    (header::CACHE_CONTROL, "no-cache".to_string()),
                ],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

/// Serve the main index.html file.
pub fn serve_index() -> Response {
    serve_static("index.html".to_string())
}
