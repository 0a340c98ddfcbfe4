use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// The four failure kinds a caller can observe. Handlers squash their
/// internal failures into one of these; the envelope text is fixed per code
/// and no storage error detail reaches the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    BadRequest,
    NotFound,
    Unprocessable,
    Internal,
}

pub type ApiResponse<T> = Result<Json<T>, ApiError>;

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: &'static str,
}

impl ApiError {
    pub fn status(self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ApiError::BadRequest => "Bad request",
            ApiError::NotFound => "Resource Not Found",
            ApiError::Unprocessable => "Unprocessable",
            ApiError::Internal => "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_messages_match_the_translation_table() {
        let table = [
            (ApiError::BadRequest, 400, "Bad request"),
            (ApiError::NotFound, 404, "Resource Not Found"),
            (ApiError::Unprocessable, 422, "Unprocessable"),
            (ApiError::Internal, 500, "Internal server error"),
        ];
        for (error, code, message) in table {
            assert_eq!(error.status().as_u16(), code);
            assert_eq!(error.message(), message);
        }
    }
}
