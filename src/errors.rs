use std::error;

use aws_sdk_dynamodb::error::SdkError;
use aws_smithy_types::error::display::DisplayErrorContext;
use http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("health log not found for user {user_id} at {timestamp}")]
    NotFound { user_id: String, timestamp: String },

    #[error("{0}")]
    Store(String),

    #[error("{0} is not supported")]
    MethodNotAllowed(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Wraps an SDK failure with a short context prefix, keeping the whole source chain.
    pub fn sdk<E, R>(context: &str, err: SdkError<E, R>) -> Error
    where
        E: error::Error + 'static,
        R: std::fmt::Debug,
    {
        Error::Store(format!("{}: {}", context, DisplayErrorContext(&err)))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Error::Store(_) | Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
