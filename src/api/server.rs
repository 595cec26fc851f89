use crate::api::routes;
use crate::auth::TokenVerifier;
use crate::config::SharedConfig;
use crate::counter::DynCounter;
use crate::error::Error;
use axum::Router;
use std::future::Future;
use std::sync::Arc;

#[derive(Clone)]
pub(super) struct AppState {
    pub config: SharedConfig,
    pub counter: DynCounter,
    pub verifier: Arc<TokenVerifier>,
}

/// Build the API [`Router`] around the given config and counter.
///
/// # Errors
///
/// Returns [`Error::EmptySecret`] if the configured JWT secret is empty.
pub fn router(config: SharedConfig, counter: DynCounter) -> Result<Router, Error> {
    let verifier = Arc::new(TokenVerifier::new(config.jwt_secret.as_bytes())?);
    Ok(routes::new(AppState {
        config,
        counter,
        verifier,
    }))
}

/// Build the API server future, listening on
/// [`Config::api_bind_addr`][crate::config::Config::api_bind_addr].
///
/// # Errors
///
/// Returns [`Error::EmptySecret`] if the configured JWT secret is empty.
pub fn new(
    config: SharedConfig,
    counter: DynCounter,
) -> Result<impl Future<Output = hyper::Result<()>>, Error> {
    let addr = config.api_bind_addr;
    let app = router(config, counter)?;
    Ok(axum::Server::bind(&addr).serve(app.into_make_service()))
}
