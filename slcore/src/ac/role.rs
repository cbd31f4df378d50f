use enumset::{EnumSet, EnumSetType};
use serde::{Deserialize, Serialize};

/// The closed set of roles a user may hold.
///
/// The default is the least privileged role, which is also what any
/// unrecognized stored value degrades to.
#[derive(Debug, Default, EnumSetType, Hash, Deserialize, Serialize)]
#[enumset(serialize_repr = "list")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    User,
    Artist,
    Moderator,
    Admin,
    SuperAdmin,
}

/// A set of roles, typically used as the requirement for a route.
///
/// An empty set places no restriction beyond being authenticated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Roles(pub EnumSet<Role>);

mod impls;
