use std::{
    fmt,
    str::FromStr,
};
use crate::error::RuleError;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
    Wildcard,
}

/// A route pattern, e.g. `/admin/users/{id}` or `/dashboard/*`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    segments: Vec<Segment>,
}

/// Split a request path into its non-empty segments, so trailing (and
/// repeated) slashes are ignored.
pub(crate) fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

impl FromStr for Pattern {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.starts_with('/') {
            return Err(RuleError::Relative);
        }
        let raw = segments(s).collect::<Vec<_>>();
        let last = raw.len().saturating_sub(1);
        let segments = raw.into_iter()
            .enumerate()
            .map(|(i, segment)| match segment {
                "*" if i == last => Ok(Segment::Wildcard),
                s if s.contains('*') => Err(RuleError::Wildcard),
                s if s.starts_with('{') || s.ends_with('}') => {
                    s.strip_prefix('{')
                        .and_then(|s| s.strip_suffix('}'))
                        .filter(|name| !name.is_empty()
                            && !name.contains(|c: char| c == '{' || c == '}'))
                        .map(|name| Segment::Param(name.to_string()))
                        .ok_or_else(|| RuleError::Placeholder(s.to_string()))
                }
                s => Ok(Segment::Literal(s.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in self.segments.iter() {
            match segment {
                Segment::Literal(s) => write!(f, "/{s}")?,
                Segment::Param(s) => write!(f, "/{{{s}}}")?,
                Segment::Wildcard => f.write_str("/*")?,
            }
        }
        Ok(())
    }
}

impl Pattern {
    pub fn is_match(&self, path: &str) -> bool {
        let mut path = segments(path);
        for segment in self.segments.iter() {
            match segment {
                Segment::Wildcard => return true,
                Segment::Param(_) => {
                    if path.next().is_none() {
                        return false;
                    }
                }
                Segment::Literal(s) => {
                    if path.next() != Some(s.as_str()) {
                        return false;
                    }
                }
            }
        }
        path.next().is_none()
    }

    /// Ordering key for choosing between overlapping patterns; greater
    /// is more specific.
    pub(crate) fn specificity(&self) -> (usize, usize, bool) {
        let literals = self.segments.iter()
            .filter(|s| matches!(s, Segment::Literal(_)))
            .count();
        let wildcard = matches!(self.segments.last(), Some(Segment::Wildcard));
        let fixed = self.segments.len() - usize::from(wildcard);
        (literals, fixed, !wildcard)
    }
}
