#![allow(dead_code)]

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use iotack::{Config, InMemoryCounter};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const SECRET: &str = "test-secret";

pub struct TestApp {
    pub router: Router,
    pub counter: Arc<InMemoryCounter>,
}

impl TestApp {
    pub fn new() -> Result<Self> {
        let config = Config {
            jwt_secret: SECRET.to_string(),
            ..Config::default()
        };
        let counter = Arc::new(InMemoryCounter::new());
        let router = iotack::api::router(Arc::new(config), counter.clone())?;
        Ok(Self { router, counter })
    }

    pub async fn send(&self, request: Request<Body>) -> Result<Response> {
        Ok(self.router.clone().oneshot(request).await?)
    }

    /// POST `body` to `path`, returning the status and the decoded JSON body.
    pub async fn post(
        &self,
        path: &str,
        token: Option<&str>,
        body: &str,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method("POST").uri(path);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let res = self.send(builder.body(Body::from(body.to_string()))?).await?;
        let status = res.status();
        let bytes = hyper::body::to_bytes(res.into_body()).await?;
        Ok((status, serde_json::from_slice(&bytes)?))
    }
}

pub fn token(claims: &Value, secret: &str) -> Result<String> {
    Ok(encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}
