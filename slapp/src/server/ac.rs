use axum::{
    Extension,
    Form,
    extract::{
        ConnectInfo,
        State,
    },
    response::{
        IntoResponse,
        Redirect,
        Response,
    },
};
use http::{
    StatusCode,
    header::SET_COOKIE,
    HeaderMap,
};
use serde::Deserialize;
use slac::{
    cookie,
    error::Error,
};
use std::net::SocketAddr;

use crate::{
    error::AppError,
    view,
};
use super::{
    AppState,
    cookie_header,
};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub login: String,
    pub password: String,
}

pub async fn login_form() -> Response {
    view::login_form(None).into_response()
}

pub async fn login(
    State(state): State<AppState>,
    connect_info: Option<Extension<ConnectInfo<SocketAddr>>>,
    Form(form): Form<LoginForm>,
) -> Response {
    let origin = connect_info
        .map(|Extension(ConnectInfo(addr))| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    match state.platform()
        .authenticate_user_login(&form.login, &form.password, origin)
        .await
    {
        Ok(session) => {
            let cookie = cookie::issue(
                state.authorizer.cookie_name(),
                &session.token().to_string(),
                state.platform().session_lifetime(),
                state.config.secure_cookie,
            );
            (
                [(SET_COOKIE, cookie)],
                Redirect::to(&state.config.home_path),
            ).into_response()
        }
        Err(Error::Authentication(e)) => {
            log::info!("failed login for {:?}: {e}", form.login);
            unauthorized()
        }
        Err(Error::Password(e)) => {
            log::info!("failed login for {:?}: {e}", form.login);
            unauthorized()
        }
        Err(e) => AppError::from(e).into_response(),
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        view::login_form(Some("Invalid login or password.")),
    ).into_response()
}

/// Purge the session presented by the request, if any, and expire the
/// cookie regardless.  The session is purged even when it no longer
/// resolves.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let header = cookie_header(&headers);
    if let Some(token) = state.authorizer.extract_credential(header.as_deref()) {
        if let Err(e) = state.platform().logout_session(&token).await {
            return AppError::from(e).into_response();
        }
        log::info!("session logged out");
    }
    (
        [(SET_COOKIE, cookie::clear(
            state.authorizer.cookie_name(),
            state.config.secure_cookie,
        ))],
        Redirect::to("/logged_out"),
    ).into_response()
}

pub async fn logged_out() -> Response {
    view::logged_out().into_response()
}
