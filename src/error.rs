use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::response::{ApiResponse, Meta};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Backend unavailable")]
    Backend(#[from] reqwest::Error),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, fields) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, Vec::new()),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, Vec::new()),
            AppError::Validation(fields) => (StatusCode::UNPROCESSABLE_ENTITY, fields.clone()),
            AppError::Backend(_) => (StatusCode::BAD_GATEWAY, Vec::new()),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, Vec::new()),
        };

        let body = ApiResponse {
            message: self.to_string(),
            data: Some(ErrorData {
                error: self.to_string(),
                fields,
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
