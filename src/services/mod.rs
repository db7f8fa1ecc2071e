//! Request workflows shared by the console routes.
//!
//! Services are generic over the backend traits in [`crate::api`] so they
//! can run against `mockall` doubles in tests.

use thiserror::Error;

use crate::api::ApiError;
use crate::domain::session::SessionStoreError;
use crate::domain::types::TypeConstraintError;
use crate::forms::{FieldErrors, FormError};

pub mod auth;
pub mod books;
pub mod catalog;
pub mod export;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("invalid form: {}", .0.summary())]
    Form(FieldErrors),

    #[error("{0}")]
    Backend(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<ApiError> for ServiceError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => ServiceError::Unauthorized,
            ApiError::NotFound => ServiceError::NotFound,
            ApiError::Validation(message) | ApiError::Server { message, .. } => {
                ServiceError::Backend(message)
            }
            ApiError::Transport(message) => {
                log::error!("Backend unreachable: {message}");
                ServiceError::Backend("No se pudo conectar con el servidor".to_string())
            }
            ApiError::Decode(message) => ServiceError::Internal(message),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.field_errors())
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

impl From<SessionStoreError> for ServiceError {
    fn from(err: SessionStoreError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

impl ServiceError {
    /// Message suitable for an error toast.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Unauthorized => "Sesión expirada, vuelva a iniciar sesión".to_string(),
            ServiceError::NotFound => "Registro no encontrado".to_string(),
            ServiceError::Form(errors) => errors.summary(),
            ServiceError::Backend(message) => message.clone(),
            ServiceError::Internal(_) => "Error inesperado, intente nuevamente".to_string(),
        }
    }
}
