use slcore::ac::{
    role::Roles,
    session::SessionToken,
    user::User,
};
use slrbac::PolicyTable;
use std::{
    str::FromStr,
    sync::Arc,
    time::Duration,
};

use crate::{
    cookie,
    error::Error,
    session::Session,
    Platform,
};
use super::*;

impl Denial {
    pub fn landing(&self) -> Landing {
        match self {
            Denial::InsufficientRole => Landing::Home,
            Denial::NoCredential
            | Denial::InvalidOrExpiredCredential
            | Denial::CollaboratorUnavailable => Landing::Login,
        }
    }
}

/// Decide whether the principal meets the required roles.
///
/// Without a principal this always denies, even when no role is
/// required.
pub fn authorize(principal: Option<&User>, required: Roles) -> Result<&User, Denial> {
    let user = principal.ok_or(Denial::NoCredential)?;
    if user.satisfies(required) {
        Ok(user)
    } else {
        Err(Denial::InsufficientRole)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            platform: None,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            policy: None,
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn platform(mut self, val: Platform) -> Self {
        self.platform = Some(val);
        self
    }

    pub fn cookie_name(mut self, val: impl Into<String>) -> Self {
        self.cookie_name = val.into();
        self
    }

    pub fn lookup_timeout(mut self, val: Duration) -> Self {
        self.lookup_timeout = val;
        self
    }

    pub fn policy(mut self, val: PolicyTable) -> Self {
        self.policy = Some(val);
        self
    }

    pub fn build(self) -> Result<SessionAuthorizer, Error> {
        let policy = match self.policy {
            Some(policy) => policy,
            None => slrbac::Builder::new().build()?,
        };
        Ok(SessionAuthorizer(Arc::new(Inner {
            platform: self.platform
                .ok_or(Error::Builder("platform"))?,
            cookie_name: self.cookie_name,
            lookup_timeout: self.lookup_timeout,
            policy,
        })))
    }
}

impl SessionAuthorizer {
    pub fn platform(&self) -> &Platform {
        &self.0.platform
    }

    pub fn cookie_name(&self) -> &str {
        &self.0.cookie_name
    }

    pub fn policy(&self) -> &PolicyTable {
        &self.0.policy
    }

    /// The session credential from the `Cookie` header, if present.
    pub fn extract_credential(&self, header: Option<&str>) -> Option<SessionToken> {
        cookie::extract_credential(header, &self.0.cookie_name)
            .and_then(|value| SessionToken::from_str(value).ok())
    }

    /// Resolve the credential into an active session.
    ///
    /// The lookup is bounded by the configured timeout and never
    /// retried; failing to complete it denies.
    pub async fn resolve_session(&self, token: &SessionToken) -> Result<Session, Denial> {
        let lookup = self.0.platform.resolve_session(token);
        match tokio::time::timeout(self.0.lookup_timeout, lookup).await {
            Ok(Ok(Some(session))) => Ok(session),
            Ok(Ok(None)) => Err(Denial::InvalidOrExpiredCredential),
            Ok(Err(e)) => {
                log::warn!("session lookup failed: {e}");
                Err(Denial::CollaboratorUnavailable)
            }
            Err(_) => {
                log::warn!(
                    "session lookup timed out after {:?}",
                    self.0.lookup_timeout,
                );
                Err(Denial::CollaboratorUnavailable)
            }
        }
    }

    /// Run extract, resolve and authorize for the required roles.
    pub async fn check(
        &self,
        header: Option<&str>,
        required: Roles,
    ) -> Result<Session, Denial> {
        let token = self.extract_credential(header)
            .ok_or(Denial::NoCredential)?;
        let session = self.resolve_session(&token).await?;
        authorize(Some(session.user().inner()), required)?;
        Ok(session)
    }

    /// Check the request against the policy for the path.  Public paths
    /// produce `Ok(None)` without consulting the session store.
    pub async fn check_route(
        &self,
        header: Option<&str>,
        path: &str,
    ) -> Result<Option<Session>, Denial> {
        let Some(required) = self.0.policy.lookup(path) else {
            return Ok(None);
        };
        let result = self.check(header, required).await;
        match &result {
            Ok(session) => log::trace!(
                "granted {path:?} to user id {}",
                session.user().id(),
            ),
            Err(denial) => log::trace!("denied {path:?}: {denial}"),
        }
        result.map(Some)
    }
}
