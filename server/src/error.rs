use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::ErrorReply;
use thiserror::Error;

/// Errors surfaced to API callers as structured JSON payloads.
///
/// The display strings are the wire-level error messages, so changing
/// them changes the API contract.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No files uploaded")]
    NoFiles,
    #[error("Invalid file type or MIME type")]
    InvalidFileType,
    #[error("File not found")]
    NotFound,
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NoFiles | ApiError::InvalidFileType => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorReply {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(e: rusqlite::Error) -> Self {
        match e {
            rusqlite::Error::QueryReturnedNoRows => ApiError::NotFound,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ApiError::NoFiles, StatusCode::BAD_REQUEST)]
    #[case(ApiError::InvalidFileType, StatusCode::BAD_REQUEST)]
    #[case(ApiError::NotFound, StatusCode::NOT_FOUND)]
    #[case(ApiError::Internal(String::new()), StatusCode::INTERNAL_SERVER_ERROR)]
    #[trace]
    fn status_codes(#[case] error: ApiError, #[case] expected: StatusCode) {
        // Arrange

        // Act
        let status = error.status_code();

        // Assert
        assert_eq!(status, expected);
    }

    #[rstest]
    #[case(ApiError::NoFiles, "No files uploaded")]
    #[case(ApiError::InvalidFileType, "Invalid file type or MIME type")]
    #[case(ApiError::NotFound, "File not found")]
    #[trace]
    fn wire_messages(#[case] error: ApiError, #[case] expected: &str) {
        // Arrange

        // Act
        let message = error.to_string();

        // Assert
        assert_eq!(message, expected);
    }

    #[test]
    fn missing_row_maps_to_not_found() {
        // Arrange
        let e = rusqlite::Error::QueryReturnedNoRows;

        // Act
        let api: ApiError = e.into();

        // Assert
        assert_eq!(api.status_code(), StatusCode::NOT_FOUND);
    }
}
