use slcore::error::ValueError;

#[non_exhaustive]
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("policy line {line}: {source}")]
    Line {
        line: usize,
        source: RuleError,
    },
    #[error("route {pattern:?}: {source}")]
    Route {
        pattern: String,
        source: RuleError,
    },
}

#[non_exhaustive]
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RuleError {
    #[error("expected `pattern, ROLE ...`")]
    Syntax,
    #[error("pattern must start with `/`")]
    Relative,
    #[error("`*` may only appear as the final segment")]
    Wildcard,
    #[error("malformed placeholder {0:?}")]
    Placeholder(String),
    #[error(transparent)]
    Role(#[from] ValueError),
}
