use crate::error::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub(crate) struct APIError(anyhow::Error);

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        let any_err = self.0;
        let (status, status_text) = match any_err.downcast_ref::<Error>() {
            Some(Error::MissingMessage | Error::InvalidBody(_)) => {
                (StatusCode::BAD_REQUEST, "Invalid request.")
            }
            Some(Error::MissingToken | Error::InvalidToken(_)) => {
                (StatusCode::UNAUTHORIZED, "Unauthorized.")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error."),
        };
        let body = Json(json!({
            "status": status_text,
            "error": format!("{any_err}"),
        }));
        (status, body).into_response()
    }
}

impl<E> From<E> for APIError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
