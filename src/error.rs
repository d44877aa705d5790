//! Error taxonomy for REST calls and the notices they turn into.
//!
//! ERROR HANDLING
//! ==============
//! Every async page operation ends in a local match on [`ApiError`]; nothing
//! is rethrown across a page boundary. [`ApiError::user_message`] is the only
//! place that decides what the operator reads in a toast.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::net::http::TransportError;

pub const SESSION_EXPIRED_MESSAGE: &str = "Sesión expirada. Inicia sesión nuevamente.";
pub const CONNECTION_ERROR_MESSAGE: &str = "Error de conexión con el servidor";
pub const INVALID_RESPONSE_MESSAGE: &str = "Respuesta inválida del servidor";
pub const GENERIC_FAILURE_MESSAGE: &str = "La operación no se pudo completar";

/// Failure of a call against the backend REST API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered 401, or no valid session exists for an authenticated call.
    #[error("unauthorized")]
    Unauthorized,
    /// Any other non-2xx status. `message` is the server's own explanation when it sent one.
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),
    /// The body was not the JSON shape we expected.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// The request body could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
    /// Client-side validation rejected the input before any request.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Whether this failure means the session is gone and the user must log in again.
    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Text shown to the operator in a notification.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized => SESSION_EXPIRED_MESSAGE.to_owned(),
            Self::Status { message: Some(message), .. } if !message.trim().is_empty() => message.clone(),
            Self::Status { status, .. } => format!("{GENERIC_FAILURE_MESSAGE} ({status})"),
            Self::Network(_) => CONNECTION_ERROR_MESSAGE.to_owned(),
            Self::InvalidResponse(_) => INVALID_RESPONSE_MESSAGE.to_owned(),
            Self::Encode(_) => GENERIC_FAILURE_MESSAGE.to_owned(),
            Self::Validation(message) => message.clone(),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Network(message) => Self::Network(message),
            TransportError::Body(message) => Self::InvalidResponse(message),
            TransportError::Request(message) => Self::Validation(message),
        }
    }
}
