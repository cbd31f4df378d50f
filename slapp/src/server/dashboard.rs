use axum::{
    extract::State,
    response::Html,
};

use crate::{
    error::AppError,
    view,
};
use super::{
    AppState,
    CurrentSession,
};

pub async fn index(
    CurrentSession(session): CurrentSession,
) -> Html<String> {
    view::dashboard(session.user())
}

pub async fn sessions(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Html<String>, AppError> {
    let sessions = state.platform()
        .get_user_sessions(session.user().id())
        .await?;
    Ok(view::sessions(&sessions))
}

pub async fn artist(
    CurrentSession(session): CurrentSession,
) -> Html<String> {
    view::artist(session.user())
}
