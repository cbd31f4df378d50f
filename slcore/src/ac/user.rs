use serde::{Deserialize, Serialize};
use super::Role;

/// A user record, as resolved through a session; this is the
/// authenticated principal for the duration of a request.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub avatar: Option<String>,
    pub role: Role,
    pub is_admin: bool,
    pub created_ts: i64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct UserPassword {
    pub id: i64,
    pub user_id: i64,
    pub password: String,
    pub created_ts: i64,
}

mod impls;
