use axum::{
    Form,
    extract::{
        Path,
        State,
    },
    response::{
        Html,
        Redirect,
    },
};
use serde::Deserialize;
use slac::user::User;
use slcore::ac::role::{
    Role,
    Roles,
};
use std::str::FromStr;

use crate::{
    error::AppError,
    view,
};
use super::{
    AppState,
    CurrentSession,
};

#[derive(Debug, Deserialize)]
pub struct RoleForm {
    pub role: String,
    #[serde(default)]
    pub is_admin: bool,
}

fn manager_roles() -> Roles {
    Roles::from(Role::Admin) | Role::SuperAdmin
}

// Only super admins and holders of the admin flag may touch super
// admins, holders of the admin flag, or the flag itself.
fn is_superuser(user: &User) -> bool {
    user.is_admin() || user.role() == Role::SuperAdmin
}

pub async fn index(
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let users = state.platform().list_users().await?;
    Ok(view::admin_index(&users))
}

pub async fn user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let user = state.platform()
        .get_user(id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(view::admin_user(user.inner()))
}

pub async fn update_role(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<i64>,
    Form(form): Form<RoleForm>,
) -> Result<Redirect, AppError> {
    let actor = session.user();
    if !actor.satisfies(manager_roles()) {
        return Err(AppError::Forbidden);
    }
    let role = Role::from_str(&form.role)
        .map_err(|_| AppError::BadRequest)?;
    let target = state.platform()
        .get_user(id)
        .await?
        .ok_or(AppError::NotFound)?;
    let privileged = role == Role::SuperAdmin
        || target.role() == Role::SuperAdmin
        || target.is_admin()
        || target.is_admin() != form.is_admin;
    if privileged && !is_superuser(actor) {
        log::info!(
            "user {:?} denied privileged change to user id {id}",
            actor.username(),
        );
        return Err(AppError::Forbidden);
    }

    if target.role() != role {
        state.platform().set_user_role(id, role).await?;
    }
    if target.is_admin() != form.is_admin {
        state.platform().set_user_admin(id, form.is_admin).await?;
    }
    Ok(Redirect::to(&format!("/admin/users/{id}")))
}
