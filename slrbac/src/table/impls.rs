use slcore::ac::role::Roles;
use std::fmt;
use super::*;

impl PolicyTable {
    pub(crate) fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The most specific rule matching the path, if any.
    pub fn find(&self, path: &str) -> Option<&Rule> {
        self.rules.iter()
            .filter(|rule| rule.pattern.is_match(path))
            // max_by_key returns the last maximum; reverse to keep the
            // first declared rule on ties.
            .rev()
            .max_by_key(|rule| rule.pattern.specificity())
    }

    /// The roles required by the path; `None` denotes a public path.
    pub fn lookup(&self, path: &str) -> Option<Roles> {
        let result = self.find(path).map(|rule| rule.roles);
        log::trace!("lookup {path:?} -> {result:?}");
        result
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roles = self.roles.iter()
            .map(<&'static str>::from)
            .collect::<Vec<_>>()
            .join(" ");
        if roles.is_empty() {
            write!(f, "{},", self.pattern)
        } else {
            write!(f, "{}, {roles}", self.pattern)
        }
    }
}

/// Renders the table in the policy text format.
impl fmt::Display for PolicyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.rules.iter()
            .try_for_each(|rule| writeln!(f, "{rule}"))
    }
}
