use slcore::ac::role::Roles;
use std::str::FromStr;
use crate::{
    DEFAULT_POLICIES,
    Pattern,
    PolicyTable,
    Rule,
    error::{Error, RuleError},
};

#[derive(Clone, Debug)]
enum Source {
    Text(String),
    Route(String, Roles),
}

/// Builds the route `PolicyTable`.
///
/// Methods can be chained in order to add rules; the table is
/// validated and constructed by calling [`build`](Builder::build).
///
/// New instances of the builder can be obtained via `Builder::default`
/// or `Builder::new`.  The former provides nothing while the latter
/// provides the default policy.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    sources: Vec<Source>,
}

fn parse_line(line: &str) -> Result<Option<Rule>, RuleError> {
    let line = line.split('#')
        .next()
        .unwrap_or_default()
        .trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (pattern, roles) = line.split_once(',')
        .ok_or(RuleError::Syntax)?;
    Ok(Some(Rule {
        pattern: Pattern::from_str(pattern.trim())?,
        roles: Roles::from_str(roles.trim())?,
    }))
}

impl Builder {
    pub fn new() -> Self {
        Self::default().policy(DEFAULT_POLICIES)
    }

    /// Append the rules in the provided policy text.
    pub fn policy(mut self, text: impl Into<String>) -> Self {
        self.sources.push(Source::Text(text.into()));
        self
    }

    /// Append a single rule.
    pub fn route(mut self, pattern: impl Into<String>, roles: impl Into<Roles>) -> Self {
        self.sources.push(Source::Route(pattern.into(), roles.into()));
        self
    }

    pub fn build(&self) -> Result<PolicyTable, Error> {
        let mut rules = Vec::new();
        for source in self.sources.iter() {
            match source {
                Source::Text(text) => {
                    for (n, line) in text.lines().enumerate() {
                        let rule = parse_line(line)
                            .map_err(|source| Error::Line { line: n + 1, source })?;
                        rules.extend(rule);
                    }
                }
                Source::Route(pattern, roles) => rules.push(Rule {
                    pattern: Pattern::from_str(pattern)
                        .map_err(|source| Error::Route {
                            pattern: pattern.clone(),
                            source,
                        })?,
                    roles: *roles,
                }),
            }
        }
        log::debug!("built PolicyTable with {} rules", rules.len());
        Ok(PolicyTable::new(rules))
    }
}
