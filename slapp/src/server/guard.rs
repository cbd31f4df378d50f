use axum::{
    extract::{
        Request,
        State,
    },
    middleware::Next,
    response::{
        IntoResponse,
        Redirect,
        Response,
    },
};
use chrono::Utc;
use http::{
    HeaderValue,
    header::SET_COOKIE,
};
use slac::{
    authorizer::{
        Denial,
        Landing,
    },
    cookie,
    session::Session,
};

use crate::error::AppError;
use super::{
    AppState,
    cookie_header,
};

/// Activity is recorded at most once within this many seconds.
pub const ACTIVITY_INTERVAL: i64 = 60;

/// Gate every request through the authorizer using the policy for its
/// path; a granted session is made available to the handlers and its
/// activity recorded.
pub async fn guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = cookie_header(request.headers());
    let path = request.uri().path().to_string();
    match state.authorizer.check_route(header.as_deref(), &path).await {
        Ok(Some(session)) => {
            let refreshed = record_activity(&state, &session).await;
            request.extensions_mut().insert(session);
            let mut response = next.run(request).await;
            if let Some(value) = refreshed {
                response.headers_mut().append(SET_COOKIE, value);
            }
            response
        }
        Ok(None) => next.run(request).await,
        Err(denial) => deny(&state, denial),
    }
}

/// Refresh `last_active_ts` of a session that has not been touched
/// within the interval, producing the cookie with a renewed `Max-Age`.
/// Failing to record activity does not deny the request.
async fn record_activity(state: &AppState, session: &Session) -> Option<HeaderValue> {
    let idle = Utc::now().timestamp() - session.session().last_active_ts;
    if idle < ACTIVITY_INTERVAL {
        return None;
    }
    if let Err(e) = session.save().await {
        log::warn!("failed to record activity for user id {}: {e}", session.user().id());
        return None;
    }
    let value = cookie::issue(
        state.authorizer.cookie_name(),
        session.token().as_str(),
        state.platform().session_lifetime(),
        state.config.secure_cookie,
    );
    HeaderValue::from_str(&value).ok()
}

pub fn deny(state: &AppState, denial: Denial) -> Response {
    match denial.landing() {
        Landing::Login => Redirect::to(&state.config.login_path).into_response(),
        Landing::Home if state.config.forbidden_status => AppError::Forbidden.into_response(),
        Landing::Home => Redirect::to(&state.config.home_path).into_response(),
    }
}
