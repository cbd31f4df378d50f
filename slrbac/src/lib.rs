//! Declarative route protection.
//!
//! A [`PolicyTable`] maps route patterns to the set of roles required
//! to access them.  Paths that match no pattern are public.

mod builder;
pub mod error;
mod pattern;
mod table;

pub use builder::Builder;
pub use pattern::Pattern;
pub use table::{PolicyTable, Rule};

/// The default route policy for Snowlight.
///
/// One rule per line in the form of: pattern, roles
///
/// pattern - the route, with `{name}` matching a single segment and a
///           trailing `*` matching any remaining segments.
/// roles - the roles permitted, separated by whitespace or `|`; no
///         roles means any authenticated user.
pub const DEFAULT_POLICIES: &str = "\
# the admin console
/admin/*, ADMIN SUPER_ADMIN MODERATOR

# every user has a dashboard
/dashboard/*,

# artist tooling within the dashboard
/dashboard/artist/*, ARTIST ADMIN SUPER_ADMIN
";
