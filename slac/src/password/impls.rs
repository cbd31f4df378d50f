use argon2::{
    password_hash::{
        rand_core::OsRng,
        PasswordHash,
        PasswordHasher,
        PasswordVerifier,
        SaltString,
    },
    Argon2,
};
use std::fmt;

use crate::error::{
    AuthenticationError,
    Error,
    PasswordError,
};
use super::{
    Password,
    PasswordStatus,
};

const NEW: &str = "New";
const RESET: &str = "Reset";
const RESTRICTED: &str = "Restricted";

impl fmt::Display for PasswordStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<&Password<'_>> for PasswordStatus {
    fn from(val: &Password<'_>) -> Self {
        match val {
            Password::Misconfigured => PasswordStatus::Misconfigured,
            Password::New => PasswordStatus::New,
            Password::Reset => PasswordStatus::Reset,
            Password::Restricted => PasswordStatus::Restricted,
            Password::Hash(_) => PasswordStatus::Hash,
            Password::Raw(_) => PasswordStatus::Raw,
        }
    }
}

impl From<Password<'_>> for PasswordStatus {
    fn from(val: Password<'_>) -> Self {
        (&val).into()
    }
}

impl<'a> Password<'a> {
    pub fn new(s: &'a str) -> Self {
        Password::Raw(s)
    }

    /// Interpret a value as read from the password store.
    pub fn from_stored(s: &'a str) -> Self {
        match s {
            NEW => Password::New,
            RESET => Password::Reset,
            RESTRICTED => Password::Restricted,
            _ => PasswordHash::new(s)
                .map(Password::Hash)
                .unwrap_or(Password::Misconfigured)
        }
    }

    /// Produce the value to be written to the password store; raw
    /// passwords are hashed with a freshly generated salt.
    pub fn to_stored(&self) -> Result<String, Error> {
        match self {
            Password::Hash(h) => Ok(h.to_string()),
            Password::Raw(s) => {
                let salt = SaltString::generate(&mut OsRng);
                Ok(Argon2::default()
                    .hash_password(s.as_bytes(), &salt)
                    .map_err(PasswordError::from)?
                    .to_string()
                )
            },
            Password::New => Ok(NEW.to_string()),
            Password::Reset => Ok(RESET.to_string()),
            Password::Restricted => Ok(RESTRICTED.to_string()),
            Password::Misconfigured => Err(Error::Misconfiguration),
        }
    }

    pub fn status(&self) -> PasswordStatus {
        self.into()
    }

    /// Verify a raw password against a stored hash, in either order.
    pub fn verify(&self, other: &Self) -> Result<(), Error> {
        match (self, other) {
            (Password::Hash(hash), Password::Raw(raw)) |
            (Password::Raw(raw), Password::Hash(hash)) => {
                Argon2::default()
                    .verify_password(raw.as_bytes(), hash)
                    .map_err(|_| Error::from(PasswordError::Wrong))
            },
            (Password::Restricted, _) | (_, Password::Restricted) =>
                Err(AuthenticationError::Restricted.into()),
            _ => Err(PasswordError::NotVerifiable.into()),
        }
    }
}
