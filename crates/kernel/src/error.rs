//! Application error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors raised by the filter-link engine and its collaborators.
#[derive(Debug, Error)]
pub enum FacetError {
    /// `active_label()` was asked for on a filter that declares no values.
    #[error("filter '{parameter}' has no values to take a label from")]
    EmptyOptions { parameter: String },

    /// The URL builder does not know the requested route name.
    #[error("unknown route '{0}'")]
    UnknownRoute(String),

    /// Any other URL builder failure, carried through untouched.
    #[error("failed to build url for route '{route}': {reason}")]
    UrlBuild { route: String, reason: String },
}

/// Result type alias using FacetError.
pub type FacetResult<T> = Result<T, FacetError>;

/// HTTP-facing application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,

    #[error("facet error")]
    Facet(#[from] FacetError),

    #[error("template error")]
    Template(#[from] tera::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Facet(_) | AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Route and template failures mean host misconfiguration; keep the
        // details in the log, not in the response.
        let body = match &self {
            AppError::Facet(e) => {
                tracing::error!(error = %e, "filter link computation failed");
                "internal server error".to_string()
            }
            AppError::Template(e) => {
                tracing::error!(error = ?e, "template rendering failed");
                "internal server error".to_string()
            }
            AppError::NotFound => self.to_string(),
        };

        (status, body).into_response()
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn facet_errors_are_internal() {
        let response = AppError::from(FacetError::UnknownRoute("products".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn empty_options_message_names_parameter() {
        let err = FacetError::EmptyOptions {
            parameter: "sort".to_string(),
        };
        assert!(err.to_string().contains("'sort'"));
    }
}
