/// An opaque session credential.
///
/// Tokens minted by the `SessionTokenFactory` are 32 character long
/// lowercase hexadecimal strings, but any non-empty value without
/// whitespace or `;` is accepted so that credentials issued elsewhere
/// (e.g. with base64 padding) remain usable.
#[derive(Clone, Default, Eq, Hash, PartialEq)]
pub struct SessionToken(String);

#[cfg(feature = "server")]
mod factory;
#[cfg(feature = "server")]
pub use factory::SessionTokenFactory;

mod impls;
