//! Static asset serving
//!
//! The stylesheet is compiled into the binary so the server has no
//! runtime file dependencies.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

const CATALOG_CSS: &str = include_str!("../../ui/catalog.css");

/// GET /static/catalog.css
pub async fn serve_catalog_css() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        CATALOG_CSS,
    )
        .into_response()
}
