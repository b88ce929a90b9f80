use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::JsonResponse;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(&'static str),
    NotFound,
    ServerError,
    DatabaseError(sqlx::Error),
}

#[derive(serde::Serialize)]
pub struct ErrorBody {
    error: String,
}

impl ErrorBody {
    pub fn new(error: &str) -> ErrorBody {
        ErrorBody {
            error: error.to_string(),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(value: sqlx::Error) -> Self {
        Self::DatabaseError(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        self.to_json_response().into_response()
    }
}

impl ApiError {
    pub fn to_json_response(&self) -> JsonResponse<ErrorBody> {
        let (status_code, json) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, ErrorBody::new(message)),
            ApiError::NotFound => (StatusCode::NOT_FOUND, ErrorBody::new("Article not found")),
            ApiError::ServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new("Internal server error"),
            ),
            ApiError::DatabaseError(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("Internal server error"),
                )
            }
        };
        (status_code, Json(json))
    }
}
