use slcore::ac::session::{
    self,
    SessionToken,
};
use std::fmt;

use crate::{
    error::Error,
    user::User,
    Platform,
};
use super::Session;

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("session", &self.session)
            .field("user", &self.user)
            .finish()
    }
}

impl Session {
    pub(crate) fn new(
        platform: Platform,
        session: session::Session,
        user: User,
    ) -> Self {
        Self {
            platform,
            session,
            user,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn session(&self) -> &session::Session {
        &self.session
    }

    pub fn token(&self) -> &SessionToken {
        &self.session.token
    }

    /// Record activity on this session, returning the new last active
    /// timestamp.
    pub async fn save(&self) -> Result<i64, Error> {
        Ok(self.platform
            .ac_platform()
            .save_session(&self.session)
            .await?)
    }

    /// Logout this session.
    pub async fn logout(self) -> Result<(), Error> {
        log::info!("user {:?} logged out", self.user.username());
        Ok(self.platform
            .ac_platform()
            .purge_session(&self.session.token)
            .await?)
    }

    /// Logout all other sessions associated with the user.
    pub async fn logout_others(&self) -> Result<(), Error> {
        Ok(self.platform
            .ac_platform()
            .purge_user_sessions(
                self.user.id(),
                Some(self.session.token.clone()),
            )
            .await?)
    }
}
