use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Backend(#[from] slcore::error::BackendError),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),
    #[error("misconfigured stored password")]
    Misconfiguration,
    #[error("missing required argument: {0}")]
    Builder(&'static str),
    #[error(transparent)]
    Rbac(#[from] slrbac::error::Error),
}

#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum PasswordError {
    #[error(transparent)]
    Argon2(#[from] argon2::password_hash::Error),
    #[error("existing password")]
    Existing,
    #[error("mismatched password")]
    Mismatched,
    #[error("wrong password")]
    Wrong,
    #[error("password not verifiable")]
    NotVerifiable,
}

#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum AuthenticationError {
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error("restricted account")]
    Restricted,
    #[error("unknown user")]
    UnknownUser,
}
