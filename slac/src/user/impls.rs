use slcore::ac::{
    role::{
        Role,
        Roles,
    },
    user,
};
use std::fmt;

use crate::{
    Platform,
    error::{
        Error,
        PasswordError,
    },
    password::Password,
};
use super::User;

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("User")
            .field(&self.user)
            .finish()
    }
}

impl From<User> for user::User {
    fn from(val: User) -> Self {
        val.user
    }
}

impl User {
    pub(crate) fn new(
        platform: Platform,
        user: user::User,
    ) -> Self {
        Self {
            platform,
            user,
        }
    }

    pub fn id(&self) -> i64 {
        self.user.id
    }

    pub fn username(&self) -> &str {
        self.user.username.as_ref()
    }

    pub fn name(&self) -> &str {
        self.user.name.as_ref()
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin
    }

    pub fn satisfies(&self, required: Roles) -> bool {
        self.user.satisfies(required)
    }

    pub fn inner(&self) -> &user::User {
        &self.user
    }

    pub async fn update_password(
        &self,
        old_password: &str,
        new_password: &str,
        new_password_confirm: &str,
    ) -> Result<(), Error> {
        (new_password == new_password_confirm)
            .then_some(())
            .ok_or(PasswordError::Mismatched)?;
        self.platform
            .verify_user_id_password(
                self.user.id,
                old_password,
            )
            .await?;
        self.platform
            .force_user_id_password(
                self.user.id,
                Password::new(new_password),
            )
            .await
    }

    /// Set the password for a user whose stored password is either
    /// `New` or `Reset`.
    pub async fn reset_password(
        &self,
        new_password: &str,
        new_password_confirm: &str,
    ) -> Result<(), Error> {
        (new_password == new_password_confirm)
            .then_some(())
            .ok_or(PasswordError::Mismatched)?;
        self.platform
            .new_user_id_password(
                self.user.id,
                new_password,
            )
            .await
    }
}
