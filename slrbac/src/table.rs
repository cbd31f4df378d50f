use slcore::ac::role::Roles;
use crate::Pattern;

#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub pattern: Pattern,
    pub roles: Roles,
}

/// An immutable table of route rules.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolicyTable {
    rules: Vec<Rule>,
}

mod impls;
