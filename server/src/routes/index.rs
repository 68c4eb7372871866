//! Upload page
//!
//! The whole front end is one static page: a single file-upload control
//! posting to `/predict`, with a textual spinner shown while the request
//! is in flight.

use axum::response::Html;

/// The single-page upload form, compiled into the binary
pub const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// GET / - Serve the upload form
pub async fn upload_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}
