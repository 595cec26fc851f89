use crate::auth::Claims;
use crate::error::Error;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum_extra::extract::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::collections::HashMap;

/// Name of both the query parameter and the cookie a token may be sent in.
pub const TOKEN_PARAM: &str = "jwt";

/// Verifies HS256 signed tokens against a shared secret.
///
/// `exp` and `nbf` are checked when a token carries them, but neither is required. `aud` is
/// not checked.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl TokenVerifier {
    /// # Errors
    ///
    /// Returns [`Error::EmptySecret`] if `secret` is empty.
    pub fn new(secret: &[u8]) -> Result<Self, Error> {
        if secret.is_empty() {
            return Err(Error::EmptySecret);
        }
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_nbf = true;
        validation.validate_aud = false;
        Ok(Self {
            key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Verify `token`, returning its claims.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToken`] if the token is malformed, signed with another key or
    /// algorithm, or outside its validity window.
    pub fn verify(&self, token: &str) -> Result<Claims, Error> {
        Ok(decode::<Claims>(token, &self.key, &self.validation)?.claims)
    }
}

/// Find the raw token of a request. Sources are tried in order: the [`TOKEN_PARAM`] query
/// parameter, a `Bearer` `Authorization` header (scheme matched case-insensitively), then the
/// [`TOKEN_PARAM`] cookie. Empty values are skipped.
pub fn find_token(
    query: &HashMap<String, String>,
    headers: &HeaderMap,
    cookies: &CookieJar,
) -> Option<String> {
    query
        .get(TOKEN_PARAM)
        .map(String::as_str)
        .filter(|t| !t.is_empty())
        .or_else(|| {
            headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(bearer_token)
        })
        .or_else(|| {
            cookies
                .get(TOKEN_PARAM)
                .map(|c| c.value())
                .filter(|t| !t.is_empty())
        })
        .map(str::to_string)
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
