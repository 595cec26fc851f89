//! Bearer token verification and claim decoding.
//!
//! Tokens are HS256 signed JWTs. Only one claim is consumed by the service, `device_id`, which
//! is decoded by [`device_id`] from any [`ClaimsLookup`] implementation.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

pub mod token;

pub use token::TokenVerifier;

/// Name of the claim carrying the submitting device's identifier.
pub const DEVICE_ID_CLAIM: &str = "device_id";

/// The verified payload of a token: string keys mapped to dynamically typed JSON values.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl From<Map<String, Value>> for Claims {
    fn from(claims: Map<String, Value>) -> Self {
        Self(claims)
    }
}

/// Read access to a set of claims by name.
pub trait ClaimsLookup {
    fn claim(&self, name: &str) -> Option<&Value>;
}

impl ClaimsLookup for Claims {
    fn claim(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

impl ClaimsLookup for Map<String, Value> {
    fn claim(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl<S: std::hash::BuildHasher> ClaimsLookup for HashMap<String, Value, S> {
    fn claim(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

/// Decode the `device_id` claim.
///
/// Integral JSON numbers are returned as-is, fractional ones are truncated toward zero
/// (saturating at the `i64` bounds). A missing claim or a non-numeric value yields `None`.
#[allow(clippy::cast_possible_truncation)]
pub fn device_id<C: ClaimsLookup + ?Sized>(claims: &C) -> Option<i64> {
    match claims.claim(DEVICE_ID_CLAIM)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        _ => None,
    }
}
