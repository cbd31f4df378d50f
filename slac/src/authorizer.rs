//! The session and role gate protecting routes.
//!
//! A request is checked by extracting the session credential from its
//! `Cookie` header, resolving it into a session and user through the
//! platform, then authorizing that user against the roles required by
//! the route.  Each step short-circuits with a [`Denial`], and every
//! failure of the session store denies.

use slrbac::PolicyTable;
use std::{
    sync::Arc,
    time::Duration,
};

use crate::Platform;

pub const DEFAULT_COOKIE_NAME: &str = "auth_token";
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_millis(2000);

/// The reasons a request may be turned away.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Denial {
    #[error("no session credential")]
    NoCredential,
    #[error("invalid or expired session credential")]
    InvalidOrExpiredCredential,
    #[error("insufficient role")]
    InsufficientRole,
    #[error("session store unavailable")]
    CollaboratorUnavailable,
}

/// Where a denied request should be sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Landing {
    Login,
    Home,
}

/// Builds the `SessionAuthorizer`; the default policy of `slrbac` is
/// used unless a policy table is provided.
pub struct Builder {
    platform: Option<Platform>,
    cookie_name: String,
    lookup_timeout: Duration,
    policy: Option<PolicyTable>,
}

struct Inner {
    platform: Platform,
    cookie_name: String,
    lookup_timeout: Duration,
    policy: PolicyTable,
}

#[derive(Clone)]
pub struct SessionAuthorizer(Arc<Inner>);

mod impls;

pub use impls::authorize;
