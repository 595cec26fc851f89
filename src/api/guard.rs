use crate::api::api_error::APIError;
use crate::api::server::AppState;
use crate::auth::token::find_token;
use crate::error::Error;
use axum::extract::{Query, State};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use std::collections::HashMap;

/// Reject requests without a valid token before they reach the wrapped handler. Verified
/// [`Claims`][crate::auth::Claims] are added to the request extensions.
pub(super) async fn require_token<B>(
    State(state): State<AppState>,
    cookies: CookieJar,
    mut request: Request<B>,
    next: Next<B>,
) -> Result<Response, APIError> {
    let query = Query::<HashMap<String, String>>::try_from_uri(request.uri())
        .map(|Query(query)| query)
        .unwrap_or_default();
    let Some(token) = find_token(&query, request.headers(), &cookies) else {
        tracing::debug!("rejected {}: no token", request.uri());
        return Err(Error::MissingToken.into());
    };

    let claims = match state.verifier.verify(&token) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::debug!("rejected {}: {err}", request.uri());
            return Err(err.into());
        }
    };

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
