use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::models::envelope::ErrorBody;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not authorized")]
    Unauthorized,

    #[error("Entity not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Backend error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Connection error: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Maps a non-success status and its raw body to an error.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.message());

        match status {
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound,
            400 | 409 | 422 => {
                ApiError::Validation(message.unwrap_or_else(|| "Solicitud inválida".to_string()))
            }
            _ => ApiError::Server {
                status,
                message: message.unwrap_or_else(|| "Error del servidor".to_string()),
            },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<TypeConstraintError> for ApiError {
    fn from(err: TypeConstraintError) -> Self {
        ApiError::Decode(err.to_string())
    }
}
