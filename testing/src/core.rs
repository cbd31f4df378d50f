use async_trait::async_trait;
use mockall::mock;
use slcore::{
    ac::{
        role::Role,
        session::{
            Session,
            SessionToken,
        },
        traits::{
            SessionBackend,
            UserBackend,
        },
        user::User,
    },
    error::BackendError,
    platform::{
        DefaultACPlatform,
        PlatformUrl,
    },
};
use std::time::Duration;

mock! {
    pub Platform {}

    #[async_trait]
    impl UserBackend for Platform {
        async fn add_user(&self, username: &str, name: &str) -> Result<i64, BackendError>;
        async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, BackendError>;
        async fn get_user_by_name(&self, username: &str) -> Result<Option<User>, BackendError>;
        async fn list_users(&self) -> Result<Vec<User>, BackendError>;
        async fn set_user_role(&self, id: i64, role: Role) -> Result<bool, BackendError>;
        async fn set_user_admin(&self, id: i64, is_admin: bool) -> Result<bool, BackendError>;
        async fn get_user_password(&self, user_id: i64) -> Result<String, BackendError>;
        async fn store_user_password(&self, user_id: i64, password: &str) -> Result<i64, BackendError>;
        async fn purge_user_passwords(&self, user_id: i64) -> Result<(), BackendError>;
    }

    #[async_trait]
    impl SessionBackend for Platform {
        async fn save_session(&self, session: &Session) -> Result<i64, BackendError>;
        async fn load_session(&self, token: &SessionToken) -> Result<Option<Session>, BackendError>;
        async fn purge_session(&self, token: &SessionToken) -> Result<(), BackendError>;
        async fn get_user_sessions(&self, user_id: i64) -> Result<Vec<Session>, BackendError>;
        async fn purge_user_sessions(&self, user_id: i64, keep: Option<SessionToken>) -> Result<(), BackendError>;
    }

    impl PlatformUrl for Platform {
        fn url(&self) -> &str;
    }
}

impl DefaultACPlatform for MockPlatform {}

/// A backend whose session lookups never complete in any reasonable
/// time; every other operation fails outright.
pub struct StalledPlatform {
    pub delay: Duration,
}

impl Default for StalledPlatform {
    fn default() -> Self {
        Self { delay: Duration::from_secs(3600) }
    }
}

impl StalledPlatform {
    async fn stall<T>(&self) -> Result<T, BackendError> {
        tokio::time::sleep(self.delay).await;
        Err(BackendError::Unknown)
    }
}

#[async_trait]
impl UserBackend for StalledPlatform {
    async fn add_user(&self, _: &str, _: &str) -> Result<i64, BackendError> {
        Err(BackendError::Unknown)
    }
    async fn get_user_by_id(&self, _: i64) -> Result<Option<User>, BackendError> {
        self.stall().await
    }
    async fn get_user_by_name(&self, _: &str) -> Result<Option<User>, BackendError> {
        self.stall().await
    }
    async fn list_users(&self) -> Result<Vec<User>, BackendError> {
        Err(BackendError::Unknown)
    }
    async fn set_user_role(&self, _: i64, _: Role) -> Result<bool, BackendError> {
        Err(BackendError::Unknown)
    }
    async fn set_user_admin(&self, _: i64, _: bool) -> Result<bool, BackendError> {
        Err(BackendError::Unknown)
    }
    async fn get_user_password(&self, _: i64) -> Result<String, BackendError> {
        Err(BackendError::Unknown)
    }
    async fn store_user_password(&self, _: i64, _: &str) -> Result<i64, BackendError> {
        Err(BackendError::Unknown)
    }
    async fn purge_user_passwords(&self, _: i64) -> Result<(), BackendError> {
        Err(BackendError::Unknown)
    }
}

#[async_trait]
impl SessionBackend for StalledPlatform {
    async fn save_session(&self, _: &Session) -> Result<i64, BackendError> {
        Err(BackendError::Unknown)
    }
    async fn load_session(&self, _: &SessionToken) -> Result<Option<Session>, BackendError> {
        self.stall().await
    }
    async fn purge_session(&self, _: &SessionToken) -> Result<(), BackendError> {
        Err(BackendError::Unknown)
    }
    async fn get_user_sessions(&self, _: i64) -> Result<Vec<Session>, BackendError> {
        Err(BackendError::Unknown)
    }
    async fn purge_user_sessions(&self, _: i64, _: Option<SessionToken>) -> Result<(), BackendError> {
        Err(BackendError::Unknown)
    }
}

impl PlatformUrl for StalledPlatform {
    fn url(&self) -> &str {
        "stalled::"
    }
}

impl DefaultACPlatform for StalledPlatform {}
