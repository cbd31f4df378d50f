use crate::ac::role::Roles;
use super::User;

impl User {
    /// Whether this user meets the role requirement.
    ///
    /// An empty requirement is met by any user; otherwise the admin
    /// flag or membership of the role in the requirement is needed.
    pub fn satisfies(&self, required: Roles) -> bool {
        required.is_empty()
            || self.is_admin
            || required.contains(self.role)
    }
}
