pub mod agent;
pub mod role;
pub mod session;
pub mod traits;
pub mod user;

pub use self::role::{Role, Roles};
