//! Error types for catalog-web
//!
//! Every handler error ends up here. Database failures are not retried or
//! interpreted: they become a generic 500 page.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::views;

/// Handler error type
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Resource not found (404)
    #[error("{0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Data access and other server-side failures (500)
    #[error(transparent)]
    Other(#[from] anyhow::Error),

    /// catalog-common error
    #[error(transparent)]
    Common(#[from] catalog_common::Error),
}

impl CatalogError {
    pub fn status(&self) -> StatusCode {
        match self {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CatalogError::Common(catalog_common::Error::NotFound(_)) => StatusCode::NOT_FOUND,
            CatalogError::Common(catalog_common::Error::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Only server-side failures are worth a log line; the message of a
        // 500 is not shown to the client.
        let message = if status.is_server_error() {
            error!("Request failed: {:#}", self);
            "Something went wrong while handling this request.".to_string()
        } else {
            self.to_string()
        };

        (status, Html(views::error_page(status, &message))).into_response()
    }
}

/// Result type for handlers
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(CatalogError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(CatalogError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            CatalogError::Common(catalog_common::Error::NotFound("id".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CatalogError::Other(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_error_hides_details() {
        let response = CatalogError::Other(anyhow::anyhow!("secret table name")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
