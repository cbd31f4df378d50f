use slcore::{
    ac::{
        role::Role,
        session::{
            self,
            SessionFactory,
            SessionToken,
        },
        user,
    },
    platform::ACPlatform,
};
use std::sync::Arc;

use crate::{
    chrono::Utc,
    error::{
        AuthenticationError,
        Error,
        PasswordError,
    },
    user::User,
    password::{
        Password,
        PasswordStatus,
    },
    session::Session,
};

use super::*;

impl Builder {
    pub fn new() -> Self {
        Self {
            session_lifetime: Some(DEFAULT_SESSION_LIFETIME),
            .. Default::default()
        }
    }

    pub fn ac_platform(mut self, val: impl ACPlatform + 'static) -> Self {
        self.ac_platform = Some(Arc::new(val));
        self
    }

    pub fn shared_ac_platform(mut self, val: Arc<dyn ACPlatform>) -> Self {
        self.ac_platform = Some(val);
        self
    }

    pub fn password_autopurge(mut self, val: bool) -> Self {
        self.password_autopurge = val;
        self
    }

    pub fn session_factory(mut self, val: SessionFactory) -> Self {
        self.session_factory = val;
        self
    }

    /// The inactivity lifetime of sessions in seconds; `None` disables
    /// expiry.
    pub fn session_lifetime(mut self, val: Option<i64>) -> Self {
        self.session_lifetime = val;
        self
    }

    pub fn build(self) -> Result<Platform, Error> {
        Ok(Platform(Arc::new(PlatformInner {
            ac_platform: self.ac_platform
                .ok_or(Error::Builder("ac_platform"))?,
            password_autopurge: self.password_autopurge,
            session_factory: self.session_factory,
            session_lifetime: self.session_lifetime,
        })))
    }
}

impl Platform {
    pub(crate) fn ac_platform(&self) -> &dyn ACPlatform {
        self.0.ac_platform.as_ref()
    }

    pub fn session_lifetime(&self) -> Option<i64> {
        self.0.session_lifetime
    }
}

// User management.
impl Platform {
    /// Create a user with the `New` password marker, i.e. one that
    /// must have a password set before it may log in.
    pub async fn create_user(
        &self,
        username: &str,
        name: &str,
    ) -> Result<User, Error> {
        let id = self.0.ac_platform.add_user(username, name).await?;
        self.force_user_id_password(id, Password::New).await?;
        log::info!("created user {username:?} with id {id}");
        self.get_user(id).await?
            .ok_or(AuthenticationError::UnknownUser.into())
    }

    pub async fn get_user(
        &self,
        id: i64,
    ) -> Result<Option<User>, Error> {
        let user = self.0.ac_platform.get_user_by_id(id).await?
            .map(|user| User::new(self.clone(), user));
        Ok(user)
    }

    pub async fn get_user_by_name(
        &self,
        login: &str,
    ) -> Result<Option<User>, Error> {
        let user = self.0.ac_platform.get_user_by_name(login).await?
            .map(|user| User::new(self.clone(), user));
        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<user::User>, Error> {
        Ok(self.0.ac_platform.list_users().await?)
    }

    /// Returns whether a user was updated.
    pub async fn set_user_role(
        &self,
        id: i64,
        role: Role,
    ) -> Result<bool, Error> {
        let result = self.0.ac_platform.set_user_role(id, role).await?;
        log::info!("set role {role} for user id {id}: {result}");
        Ok(result)
    }

    /// Returns whether a user was updated.
    pub async fn set_user_admin(
        &self,
        id: i64,
        is_admin: bool,
    ) -> Result<bool, Error> {
        let result = self.0.ac_platform.set_user_admin(id, is_admin).await?;
        log::info!("set is_admin={is_admin} for user id {id}: {result}");
        Ok(result)
    }

    pub async fn authenticate_user(
        &self,
        login: &str,
        password: &str,
    ) -> Result<User, Error> {
        let user = self.0.ac_platform.get_user_by_name(login).await?
            .ok_or(AuthenticationError::UnknownUser)?;
        self.verify_user_id_password(user.id, password).await?;
        Ok(User::new(self.clone(), user))
    }

    pub async fn login_status(
        &self,
        login: &str,
    ) -> Result<(user::User, PasswordStatus), Error> {
        let user = self.0.ac_platform.get_user_by_name(login).await?
            .ok_or(AuthenticationError::UnknownUser)?;
        let result = self.0.ac_platform.get_user_password(user.id).await;
        let status = result
            .as_deref()
            .map(Password::from_stored)
            .unwrap_or(Password::Misconfigured)
            .status();
        Ok((user, status))
    }
}

// Password management

impl Platform {
    /// Set a user's password using the user's id using the provided
    /// `&str` if a new password may be set.  This will only set the
    /// desired password iff the stored password is New or Reset.
    pub async fn new_user_id_password(
        &self,
        id: i64,
        password: &str,
    ) -> Result<(), Error> {
        let result = self.0.ac_platform.get_user_password(id).await;
        let stored_password = result
            .as_deref()
            .map(Password::from_stored)
            .unwrap_or(Password::Misconfigured);
        match stored_password {
            Password::New | Password::Reset =>
                self.force_user_id_password(
                    id,
                    Password::new(password)
                ).await,
            Password::Hash(_) => Err(PasswordError::Existing)?,
            Password::Restricted => Err(AuthenticationError::Restricted)?,
            _ => Err(Error::Misconfiguration),
        }
    }

    /// Verify the incoming string as a raw password against the hashed
    /// version in the store.
    pub async fn verify_user_id_password(
        &self,
        id: i64,
        password: &str,
    ) -> Result<(), Error> {
        let result = self.0.ac_platform.get_user_password(id).await;
        let stored_password = result
            .as_deref()
            .map(Password::from_stored)
            .unwrap_or(Password::Misconfigured);
        stored_password.verify(&Password::new(password))
    }

    /// Forcibly set a user's password using the user's id using the
    /// provided `Password`
    pub async fn force_user_id_password(
        &self,
        id: i64,
        password: Password<'_>,
    ) -> Result<(), Error> {
        let stored = password.to_stored()?;
        if self.0.password_autopurge {
            self.0.ac_platform.purge_user_passwords(id).await?;
        }
        self.0.ac_platform.store_user_password(id, &stored).await?;
        Ok(())
    }
}

// Session management

impl Platform {
    pub async fn new_user_session(
        &self,
        user: User,
        origin: String,
    ) -> Result<Session, Error> {
        let session = self.0.session_factory.create(user.id(), origin);
        self.0.ac_platform.save_session(&session).await?;
        Ok(Session::new(self.clone(), session, user))
    }

    /// Resolve the token into the session along with its user.
    ///
    /// Unknown tokens, sessions inactive beyond the lifetime and
    /// sessions whose user no longer exists all resolve to `None`.  The
    /// stored session is left untouched.
    pub async fn resolve_session(
        &self,
        token: &SessionToken,
    ) -> Result<Option<Session>, Error> {
        let Some(session) = self.0.ac_platform.load_session(token).await? else {
            log::trace!("no session found for the provided token");
            return Ok(None);
        };
        let now = Utc::now().timestamp();
        if session.is_expired(now, self.0.session_lifetime) {
            log::trace!(
                "session for user id {} expired; last active at {}",
                session.user_id,
                session.last_active_ts,
            );
            return Ok(None);
        }
        let Some(user) = self.get_user(session.user_id).await? else {
            log::trace!("session references missing user id {}", session.user_id);
            return Ok(None);
        };
        Ok(Some(Session::new(self.clone(), session, user)))
    }

    /// Simply return a list of sessions without the token for the user_id
    pub async fn get_user_sessions(
        &self,
        user_id: i64,
    ) -> Result<Vec<session::Session>, Error> {
        Ok(self.0.ac_platform.get_user_sessions(user_id).await?)
    }

    /// Logout the session identified by the token, whether or not it
    /// would still resolve.
    pub async fn logout_session(
        &self,
        token: &SessionToken,
    ) -> Result<(), Error> {
        Ok(self.0.ac_platform.purge_session(token).await?)
    }

    /// Logout all sessions associated with the user_id.
    pub async fn logout_user(
        &self,
        user_id: i64,
    ) -> Result<(), Error> {
        Ok(self.0.ac_platform.purge_user_sessions(user_id, None).await?)
    }
}

// Login methods

impl Platform {
    pub async fn authenticate_user_login(
        &self,
        login: &str,
        password: &str,
        origin: String,
    ) -> Result<Session, Error> {
        let user = self.authenticate_user(login, password).await?;
        let session = self.new_user_session(user, origin).await?;
        log::info!("user {login:?} logged in");
        Ok(session)
    }
}
