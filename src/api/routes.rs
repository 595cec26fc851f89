use crate::api::api_error::APIError;
use crate::api::guard::require_token;
use crate::api::model::{MessageRequest, MessageResponse};
use crate::api::server::AppState;
use crate::auth::{self, Claims};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub(super) fn new(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(index))
        .route("/ping", get(ping))
        .nest("/v1/iot", iot(state.clone()));
    with_layers(routes, state)
}

// Request id layers are outermost so timeout and panic responses carry `x-request-id` too.
fn with_layers(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(state.config.api_timeout))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

fn iot(state: AppState) -> Router<AppState> {
    let secure = Router::new()
        .route("/secure_messages", post(create_message))
        .route_layer(middleware::from_fn_with_state(state, require_token));

    Router::new()
        .route("/messages", post(create_message))
        .merge(secure)
}

#[allow(clippy::unused_async)]
async fn index() {}

#[allow(clippy::unused_async)]
async fn ping() -> &'static str {
    "pong"
}

async fn create_message(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageResponse>), APIError> {
    let message = match MessageRequest::bind(&body) {
        Ok(message) => message,
        Err(err) => {
            tracing::debug!("rejected message: {err}");
            return Err(err.into());
        }
    };

    let counter = state.counter.increment();
    let device_id = claims.and_then(|Extension(claims)| auth::device_id(&claims));
    tracing::info!("got message {message:?} (counter {counter}, device {device_id:?})");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(message, counter, device_id)),
    ))
}
