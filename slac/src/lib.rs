pub mod authorizer;
pub mod cookie;
pub mod error;
pub mod password;
pub mod platform;
pub mod session;
pub mod user;

pub use authorizer::{
    authorize,
    Denial,
    Landing,
    SessionAuthorizer,
};
pub use platform::Platform;

pub(crate) mod chrono {
    #[cfg(not(test))]
    pub use ::chrono::Utc;
    #[cfg(test)]
    pub use test_sl::chrono::Utc;
}
