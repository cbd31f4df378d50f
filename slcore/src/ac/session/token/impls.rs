use serde::{
    de,
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};
use std::{
    str::FromStr,
    fmt,
};
use crate::error::ValueError;
use super::*;

// The token is a credential; keep it out of debug output.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("SessionToken")
            .field(&"<redacted>")
            .finish()
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SessionToken {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        (!s.is_empty() && !s.contains(|c: char| c == ';' || c.is_whitespace()))
            .then(|| Self(s.to_string()))
            .ok_or_else(|| ValueError::Unsupported(
                "session token must be non-empty without whitespace or ';'".to_string()
            ))
    }
}

impl<'de> Deserialize<'de> for SessionToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>
    {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            // redacted tokens (e.g. from session listings) round-trip
            // as the default value.
            Ok(Self::default())
        } else {
            FromStr::from_str(&s).map_err(de::Error::custom)
        }
    }
}

impl Serialize for SessionToken {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        serializer.collect_str(self)
    }
}

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A redacted token is the empty default value, as produced for
    /// listings where the actual credential must not be exposed.
    pub fn is_redacted(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use super::*;

    #[test]
    fn parse_token() -> anyhow::Result<()> {
        assert!(SessionToken::from_str("").is_err());
        assert!(SessionToken::from_str("abc def").is_err());
        assert!(SessionToken::from_str("abc;def").is_err());
        let zeros = "00000000000000000000000000000000";
        let token = SessionToken::from_str(zeros)?;
        assert_eq!(zeros, token.to_string());
        // padded values are preserved verbatim
        let padded = SessionToken::from_str("YWJjMTIz==")?;
        assert_eq!(padded.as_str(), "YWJjMTIz==");
        Ok(())
    }

    #[test]
    fn redacted_debug() -> anyhow::Result<()> {
        let token = SessionToken::from_str("validtoken123")?;
        assert!(!format!("{token:?}").contains("validtoken123"));
        assert!(SessionToken::default().is_redacted());
        assert!(!token.is_redacted());
        Ok(())
    }

    #[test]
    fn serde() -> anyhow::Result<()> {
        let token: SessionToken = serde_json::from_str(r#""validtoken123""#)?;
        assert_eq!(token.as_str(), "validtoken123");
        assert_eq!(serde_json::to_string(&token)?, r#""validtoken123""#);
        assert!(serde_json::from_str::<SessionToken>(r#""a b""#).is_err());
        Ok(())
    }
}
