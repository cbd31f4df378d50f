use slcore::ac::user;

use crate::Platform;

/// A user bound to the platform it was loaded from.
#[derive(Clone)]
pub struct User {
    platform: Platform,
    user: user::User,
}

mod impls;
