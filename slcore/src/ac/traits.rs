use async_trait::async_trait;
use crate::error::BackendError;
use super::{
    role::Role,
    session::{
        Session,
        SessionToken,
    },
    user::User,
};

#[async_trait]
pub trait UserBackend {
    async fn add_user(
        &self,
        username: &str,
        name: &str,
    ) -> Result<i64, BackendError>;
    async fn get_user_by_id(
        &self,
        id: i64,
    ) -> Result<Option<User>, BackendError>;
    async fn get_user_by_name(
        &self,
        username: &str,
    ) -> Result<Option<User>, BackendError>;
    async fn list_users(
        &self,
    ) -> Result<Vec<User>, BackendError>;
    async fn set_user_role(
        &self,
        id: i64,
        role: Role,
    ) -> Result<bool, BackendError>;
    async fn set_user_admin(
        &self,
        id: i64,
        is_admin: bool,
    ) -> Result<bool, BackendError>;
    async fn get_user_password(
        &self,
        user_id: i64,
    ) -> Result<String, BackendError>;
    async fn store_user_password(
        &self,
        user_id: i64,
        password: &str,
    ) -> Result<i64, BackendError>;
    async fn purge_user_passwords(
        &self,
        user_id: i64,
    ) -> Result<(), BackendError>;
}

#[async_trait]
pub trait SessionBackend {
    /// Insert or refresh the session, returning the new last active
    /// timestamp.
    async fn save_session(
        &self,
        session: &Session,
    ) -> Result<i64, BackendError>;
    async fn load_session(
        &self,
        token: &SessionToken,
    ) -> Result<Option<Session>, BackendError>;
    async fn purge_session(
        &self,
        token: &SessionToken,
    ) -> Result<(), BackendError>;
    /// The returned sessions have their tokens redacted.
    async fn get_user_sessions(
        &self,
        user_id: i64,
    ) -> Result<Vec<Session>, BackendError>;
    async fn purge_user_sessions(
        &self,
        user_id: i64,
        keep: Option<SessionToken>,
    ) -> Result<(), BackendError>;
}
