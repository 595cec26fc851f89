mod common;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestApp;
use iotack::MessageCounter;
use serde_json::json;
use std::collections::HashSet;

const MESSAGES: &str = "/v1/iot/messages";

#[tokio::test]
async fn accepts_message_and_counts() -> Result<()> {
    let app = TestApp::new()?;

    let (status, body) = app.post(MESSAGES, None, r#"{"key":"temp","info":42}"#).await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"id": 0, "key": "temp", "info": 42, "counter": 1, "device_id": 0})
    );
    assert_eq!(app.counter.current(), 1);
    Ok(())
}

#[tokio::test]
async fn sequential_submissions_count_in_order() -> Result<()> {
    let app = TestApp::new()?;

    for expected in 1..=5 {
        let (status, body) = app
            .post(MESSAGES, None, r#"{"id": 17, "key":"k","info":1}"#)
            .await?;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["counter"], expected);
        assert_eq!(body["id"], 0);
    }
    Ok(())
}

#[tokio::test]
async fn token_on_open_route_is_ignored() -> Result<()> {
    let app = TestApp::new()?;
    let token = common::token(&json!({"device_id": 5}), common::SECRET)?;

    let (status, body) = app
        .post(MESSAGES, Some(&token), r#"{"key":"k","info":1}"#)
        .await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["device_id"], 0);
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_rejected_without_counting() -> Result<()> {
    let app = TestApp::new()?;
    app.post(MESSAGES, None, r#"{"key":"k","info":1}"#).await?;

    for bad in ["", "not json", "{}", r#"{"id": 3}"#, r#"{"key":"k","info":"nope"}"#] {
        let (status, body) = app.post(MESSAGES, None, bad).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{bad:?}");
        assert_eq!(body["status"], "Invalid request.");
        assert!(body["error"].is_string());
    }

    assert_eq!(app.counter.current(), 1);
    let (_, body) = app.post(MESSAGES, None, r#"{"info":2}"#).await?;
    assert_eq!(body["counter"], 2);
    assert_eq!(body["key"], "");
    Ok(())
}

#[tokio::test]
async fn null_fields_and_trailing_content_are_accepted() -> Result<()> {
    let app = TestApp::new()?;

    let (status, body) = app.post(MESSAGES, None, r#"{"key":null}"#).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"id": 0, "key": "", "info": 0, "counter": 1, "device_id": 0})
    );

    let (status, body) = app.post(MESSAGES, None, r#"{"info":null}"#).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["counter"], 2);

    let (status, body) = app.post(MESSAGES, None, r#"{"key":"k"} trailing"#).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["key"], "k");
    Ok(())
}

#[tokio::test]
async fn json_content_type_is_not_required() -> Result<()> {
    let app = TestApp::new()?;
    let request = Request::builder()
        .method("POST")
        .uri(MESSAGES)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(r#"{"key":"value", "info": 1}"#))?;

    let res = app.send(request).await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submissions_get_distinct_counters() -> Result<()> {
    let app = TestApp::new()?;

    let handles: Vec<_> = (0..50)
        .map(|i| {
            let router = app.router.clone();
            tokio::spawn(async move {
                let request = Request::builder()
                    .method("POST")
                    .uri(MESSAGES)
                    .body(Body::from(format!(r#"{{"key":"k{i}","info":{i}}}"#)))?;
                let res = tower::ServiceExt::oneshot(router, request).await?;
                let bytes = hyper::body::to_bytes(res.into_body()).await?;
                let body: serde_json::Value = serde_json::from_slice(&bytes)?;
                anyhow::Ok(body["counter"].as_u64().unwrap_or_default())
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        seen.insert(handle.await??);
    }

    assert_eq!(seen, (1..=50).collect());
    assert_eq!(app.counter.current(), 50);
    Ok(())
}

#[tokio::test]
async fn ping_and_index() -> Result<()> {
    let app = TestApp::new()?;

    let res = app
        .send(Request::builder().uri("/ping").body(Body::empty())?)
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(hyper::body::to_bytes(res.into_body()).await?, "pong");

    let res = app.send(Request::builder().uri("/").body(Body::empty())?).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(hyper::body::to_bytes(res.into_body()).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn wrong_method_and_unknown_path() -> Result<()> {
    let app = TestApp::new()?;

    let res = app
        .send(Request::builder().uri(MESSAGES).body(Body::empty())?)
        .await?;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    let res = app
        .send(Request::builder().uri("/v1/iot/nope").body(Body::empty())?)
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.counter.current(), 0);
    Ok(())
}
