use argon2::password_hash::PasswordHash;

/// A password, either as stored or as supplied by a user.
///
/// Apart from hashes, the store may hold one of the plain-text markers
/// `New`, `Reset` or `Restricted`, which are never valid credentials.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub enum Password<'a> {
    Misconfigured,
    New,
    Reset,
    Restricted,
    Hash(PasswordHash<'a>),
    Raw(&'a str),
}

#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordStatus {
    Misconfigured,
    New,
    Reset,
    Restricted,
    Hash,
    Raw,
}

mod impls;
