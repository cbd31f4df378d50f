use enumset::EnumSet;
use std::{
    fmt,
    ops::BitOr,
    str::FromStr,
};
use crate::error::ValueError;
use super::{Role, Roles};

impl From<Role> for &'static str {
    fn from(role: Role) -> &'static str {
        match role {
            Role::User => "USER",
            Role::Artist => "ARTIST",
            Role::Moderator => "MODERATOR",
            Role::Admin => "ADMIN",
            Role::SuperAdmin => "SUPER_ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", <&'static str>::from(*self))
    }
}

impl FromStr for Role {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "ARTIST" => Ok(Role::Artist),
            "MODERATOR" => Ok(Role::Moderator),
            "ADMIN" => Ok(Role::Admin),
            "SUPER_ADMIN" => Ok(Role::SuperAdmin),
            s => Err(ValueError::Unsupported(s.to_string())),
        }
    }
}

impl Roles {
    pub fn empty() -> Self {
        Self(EnumSet::empty())
    }

    pub fn all() -> Self {
        Self(EnumSet::all())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(role)
    }

    pub fn insert(&mut self, role: Role) -> bool {
        self.0.insert(role)
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> {
        self.0.iter()
    }
}

impl From<Role> for Roles {
    fn from(role: Role) -> Self {
        Self(EnumSet::only(role))
    }
}

impl From<EnumSet<Role>> for Roles {
    fn from(set: EnumSet<Role>) -> Self {
        Self(set)
    }
}

impl FromIterator<Role> for Roles {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl BitOr for Roles {
    type Output = Roles;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOr<Role> for Roles {
    type Output = Roles;

    fn bitor(self, rhs: Role) -> Self::Output {
        Self(self.0 | rhs)
    }
}

impl fmt::Display for Roles {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let roles = self.iter()
            .map(<&'static str>::from)
            .collect::<Vec<_>>()
            .join(" | ");
        f.write_str(&roles)
    }
}

/// Parses role names separated by whitespace and/or `|`; an empty
/// string produces the empty set.
impl FromStr for Roles {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(|c: char| c == '|' || c.is_whitespace())
            .filter(|name| !name.is_empty())
            .map(Role::from_str)
            .collect()
    }
}

#[cfg(feature = "clap")]
mod clap {
    use ::clap::{
        ValueEnum,
        builder::PossibleValue,
    };
    use super::*;

    impl ValueEnum for Role {
        fn value_variants<'a>() -> &'a [Self] {
            &[
                Role::User,
                Role::Artist,
                Role::Moderator,
                Role::Admin,
                Role::SuperAdmin,
            ]
        }

        fn to_possible_value(&self) -> Option<PossibleValue> {
            Some(PossibleValue::new(<&'static str>::from(*self)))
        }
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;
    use super::*;

    #[test]
    fn smoke() -> anyhow::Result<()> {
        // sample of standard conversions
        assert_eq!(Role::Admin.to_string(), "ADMIN");
        assert_eq!(Role::Admin, Role::from_str("ADMIN")?);
        assert_eq!(Role::SuperAdmin.to_string(), "SUPER_ADMIN");
        assert_eq!(Role::SuperAdmin, Role::from_str("SUPER_ADMIN")?);

        // error conversion
        assert!(Role::from_str("admin").is_err());
        assert!(matches!(
            Role::from_str("no_such_role")
                .expect_err("should be an error"),
            ValueError::Unsupported(s) if s == "no_such_role",
        ));

        // infallable conversion degrades to the least privileged role
        assert_eq!(
            Role::from_str("no_such_role")
                .unwrap_or_default(),
            Role::User,
        );
        Ok(())
    }

    #[test]
    fn serde() -> anyhow::Result<()> {
        assert_eq!(serde_json::to_string(&Role::SuperAdmin)?, r#""SUPER_ADMIN""#);
        assert_eq!(serde_json::from_str::<Role>(r#""MODERATOR""#)?, Role::Moderator);
        let roles: Roles = serde_json::from_str(r#"["ADMIN", "MODERATOR"]"#)?;
        assert!(roles.contains(Role::Admin));
        assert!(roles.contains(Role::Moderator));
        assert!(!roles.contains(Role::User));
        Ok(())
    }

    #[test]
    fn roles_parse() -> anyhow::Result<()> {
        let roles = Roles::from_str("ADMIN SUPER_ADMIN | MODERATOR")?;
        assert_eq!(
            roles,
            Roles::from(Role::Admin) | Role::SuperAdmin | Role::Moderator,
        );
        assert_eq!(roles.to_string(), "MODERATOR | ADMIN | SUPER_ADMIN");
        assert!(Roles::from_str("")?.is_empty());
        assert!(Roles::from_str("  ")?.is_empty());
        assert!(Roles::from_str("ADMIN OWNER").is_err());
        Ok(())
    }
}
