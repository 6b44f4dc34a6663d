//! Allow-connect patterns.

use regex::Regex;
use std::fmt;

/// Host matcher accepted by an allow-connect registration.
///
/// Patterns are matched against `host` or `host:port`.
#[derive(Debug, Clone)]
pub enum AllowPattern {
    Literal(String),
    Expression(Regex),
}

impl AllowPattern {
    pub fn literal(host: impl Into<String>) -> Self {
        AllowPattern::Literal(host.into())
    }

    pub fn expression(source: &str) -> Result<Self, regex::Error> {
        Ok(AllowPattern::Expression(Regex::new(source)?))
    }

    pub fn matches(&self, host: &str) -> bool {
        match self {
            AllowPattern::Literal(literal) => literal == host,
            AllowPattern::Expression(regex) => regex.is_match(host),
        }
    }
}

impl PartialEq for AllowPattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AllowPattern::Literal(a), AllowPattern::Literal(b)) => a == b,
            (AllowPattern::Expression(a), AllowPattern::Expression(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Eq for AllowPattern {}

impl fmt::Display for AllowPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllowPattern::Literal(literal) => f.write_str(literal),
            AllowPattern::Expression(regex) => write!(f, "/{}/", regex.as_str()),
        }
    }
}

impl From<&str> for AllowPattern {
    fn from(host: &str) -> Self {
        AllowPattern::literal(host)
    }
}

impl From<Regex> for AllowPattern {
    fn from(regex: Regex) -> Self {
        AllowPattern::Expression(regex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AllowPattern::literal("127.0.0.1"), "127.0.0.1", true)]
    #[case(AllowPattern::literal("127.0.0.1"), "127.0.0.1:80", false)]
    #[case(AllowPattern::expression(r"^api\.test(:\d+)?$").unwrap(), "api.test:443", true)]
    #[case(AllowPattern::expression(r"^api\.test(:\d+)?$").unwrap(), "apixtest", false)]
    fn test_matches(#[case] pattern: AllowPattern, #[case] host: &str, #[case] expected: bool) {
        assert_eq!(pattern.matches(host), expected);
    }

    #[rstest]
    fn test_equality_and_display() {
        let a = AllowPattern::expression("^a$").unwrap();
        let b = AllowPattern::expression("^a$").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, AllowPattern::literal("^a$"));
        assert_eq!(a.to_string(), "/^a$/");
        assert_eq!(AllowPattern::from("x").to_string(), "x");
    }
}
