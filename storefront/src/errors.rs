use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Invalid form input or request data
    #[error("{message}")]
    BadRequest { message: String },

    /// Uploaded file exceeds the configured limit
    #[error("{message}")]
    PayloadTooLarge { message: String },

    /// A submission is already outstanding for the admin form
    #[error("An upload is already in progress")]
    UploadInProgress,

    /// The backend answered with a non-success status
    #[error("Request failed with status code {}", status.as_u16())]
    UpstreamStatus { status: reqwest::StatusCode, body: String },

    /// Transport level failure talking to a backend
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The backend answered with a body we could not understand
    #[error("error decoding response body: {message}")]
    Decode { message: String },

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Error::UploadInProgress => StatusCode::CONFLICT,
            Error::UpstreamStatus { .. } | Error::Http(_) | Error::Decode { .. } => StatusCode::BAD_GATEWAY,
            Error::Internal { .. } | Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::BadRequest { message } | Error::PayloadTooLarge { message } => message.clone(),
            Error::UploadInProgress => self.to_string(),
            Error::UpstreamStatus { .. } | Error::Http(_) | Error::Decode { .. } => "Upstream service unavailable".to_string(),
            Error::Internal { .. } | Error::Other(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::Internal { .. } | Error::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::UpstreamStatus { .. } | Error::Http(_) | Error::Decode { .. } => {
                tracing::warn!("Upstream error: {}", self);
            }
            Error::BadRequest { .. } | Error::PayloadTooLarge { .. } | Error::UploadInProgress => {
                tracing::debug!("Client error: {}", self);
            }
        }

        (self.status_code(), self.user_message()).into_response()
    }
}

impl From<minijinja::Error> for Error {
    fn from(err: minijinja::Error) -> Self {
        Error::Internal {
            operation: format!("render template: {err:#}"),
        }
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;
