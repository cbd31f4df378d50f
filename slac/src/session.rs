use slcore::ac::session;

use crate::{
    Platform,
    user::User,
};

/// A resolved session along with its user.
#[derive(Clone)]
pub struct Session {
    platform: Platform,
    session: session::Session,
    user: User,
}

mod impls;
