// src/errors.rs
use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Why a product submission failed. Every variant is shown to the admin as
/// the same failure notification; the distinction only reaches the logs.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("backend responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error("could not serialize product: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("could not build multipart payload: {0}")]
    Multipart(#[source] reqwest::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown product field: {0}")]
    UnknownField(String),

    #[error("form is no longer running")]
    Closed,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    UnprocessableEntity(String),

    #[error("Bad request")]
    BadRequest(String),

    #[error("Not found")]
    NotFound(String),

    #[error("Internal server error")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::UnprocessableEntity(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::InternalServerError(message) => {
                tracing::error!("Internal error: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::UnknownField(name) => {
                AppError::UnprocessableEntity(format!("Unknown field '{}'", name))
            }
            FormError::Closed => {
                AppError::InternalServerError("The product form is not running".to_string())
            }
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        tracing::error!("Multipart error: {:?}", err);
        AppError::BadRequest(format!("Invalid multipart data: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_field_maps_to_unprocessable_entity() {
        let response = AppError::from(FormError::UnknownField("colour".into())).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn closed_form_maps_to_internal_error() {
        let response = AppError::from(FormError::Closed).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
