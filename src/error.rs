//! Error types.

/// Error enumerates the possible service error states.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when a message body is valid JSON but carries none of the
    /// [`Message`][crate::api::model::Message] fields, e.g. `{}` or `{"id": 7}`.
    #[error("missing required Message fields")]
    MissingMessage,

    /// Returned when a message body can't be decoded as a JSON message object.
    #[error("invalid message body: {0}")]
    InvalidBody(serde_json::Error),

    /// Returned by the [secure messages endpoint][crate::api] when
    /// the request carries no `jwt` query parameter, bearer `Authorization` header or `jwt`
    /// cookie.
    #[error("no token found")]
    MissingToken,

    /// Returned by the [secure messages endpoint][crate::api] when
    /// the presented token fails verification (bad signature, malformed, expired, ...).
    #[error("token is unauthorized: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// Returned when the configured [`Config::jwt_secret`][crate::config::Config::jwt_secret]
    /// is empty.
    #[error("JWT secret must not be empty")]
    EmptySecret,

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when [loading a `Config`][crate::config::Config::try_from_file] fails due to
    /// invalid JSON content.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),
}
