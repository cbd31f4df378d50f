use axum::{
    Router,
    extract::FromRequestParts,
    middleware,
    routing::{
        get,
        post,
    },
};
use http::{
    HeaderMap,
    header::COOKIE,
    request::Parts,
};
use slac::{
    Platform,
    SessionAuthorizer,
    session::Session,
};
use std::sync::Arc;

use crate::{
    conf::Config,
    error::AppError,
};

pub mod ac;
pub mod admin;
pub mod dashboard;
pub mod guard;
pub mod index;

#[derive(Clone)]
pub struct AppState {
    pub authorizer: SessionAuthorizer,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(authorizer: SessionAuthorizer, config: Config) -> Self {
        Self {
            authorizer,
            config: config.into(),
        }
    }

    pub fn platform(&self) -> &Platform {
        self.authorizer.platform()
    }
}

/// The session the guard resolved for the request; handlers on public
/// routes will find none and reject as unauthorized.
pub struct CurrentSession(pub Session);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts.extensions
            .get::<Session>()
            .cloned()
            .map(CurrentSession)
            .ok_or(AppError::Unauthorized)
    }
}

/// All `Cookie` header values joined into one; values that are not
/// UTF-8 are skipped.
pub(crate) fn cookie_header(headers: &HeaderMap) -> Option<String> {
    let joined = headers.get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ");
    (!joined.is_empty()).then_some(joined)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::index))
        .route("/login", get(ac::login_form).post(ac::login))
        .route("/logout", post(ac::logout))
        .route("/logged_out", get(ac::logged_out))
        .route("/dashboard", get(dashboard::index))
        .route("/dashboard/sessions", get(dashboard::sessions))
        .route("/dashboard/artist", get(dashboard::artist))
        .route("/admin", get(admin::index))
        .route("/admin/users/{id}", get(admin::user))
        .route("/admin/users/{id}/role", post(admin::update_role))
        .fallback(index::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), guard::guard))
        .with_state(state)
}
