use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{ExtractionError, GenerationError};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// None of `text`, `url` or `document` carried anything usable
    #[error("No input provided.")]
    NoInput,

    /// The body could not be read as JSON or multipart
    #[error("{0}")]
    BadRequest(String),

    #[error("Uploaded document is too large.")]
    PayloadTooLarge,

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// Already reduced to a client-safe message by the generator
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NoInput | Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Error::Extraction(_) | Error::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::Extraction(_) | Error::Generation(_) => {
                tracing::error!("Request failed: {:#}", self);
            }
            Error::NoInput | Error::BadRequest(_) | Error::PayloadTooLarge => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let mut message = self.to_string();
        if message.is_empty() {
            message = "An unknown server error occurred.".into();
        }

        (self.status_code(), Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yt::TranscriptError;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::NoInput.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            Error::BadRequest("bad json".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::PayloadTooLarge.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            Error::from(ExtractionError::from(TranscriptError::Disabled("id".into()))).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::from(GenerationError::InvalidCredential).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_messages() {
        assert_eq!(Error::NoInput.to_string(), "No input provided.");
        assert_eq!(
            Error::from(GenerationError::Failed).to_string(),
            "Failed to generate content from AI model."
        );
        assert_eq!(
            Error::from(ExtractionError::from(TranscriptError::Disabled("abc".into()))).to_string(),
            "Transcript is disabled on this video (abc)"
        );
    }
}
