//! Search patterns accepted by the replace operation.

use crate::substitution::transform::TransformError;
use std::fmt;

/// Regular expression flags, the same set a JavaScript `RegExp` accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub has_indices: bool,
    pub global: bool,
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_all: bool,
    pub unicode: bool,
    pub unicode_sets: bool,
    /// Matches must start exactly where the previous one ended
    pub sticky: bool,
}

impl Flags {
    /// Parse a flag string such as `"gi"`.
    pub fn parse(flags: &str) -> Result<Self, TransformError> {
        let mut parsed = Flags::default();
        for c in flags.chars() {
            let slot = match c {
                'd' => &mut parsed.has_indices,
                'g' => &mut parsed.global,
                'i' => &mut parsed.case_insensitive,
                'm' => &mut parsed.multi_line,
                's' => &mut parsed.dot_all,
                'u' => &mut parsed.unicode,
                'v' => &mut parsed.unicode_sets,
                'y' => &mut parsed.sticky,
                other => return Err(TransformError::UnknownFlag(other)),
            };
            if *slot {
                return Err(TransformError::DuplicateFlag(c));
            }
            *slot = true;
        }
        if parsed.unicode && parsed.unicode_sets {
            return Err(TransformError::ConflictingFlags('u', 'v'));
        }
        Ok(parsed)
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Same order as RegExp.prototype.flags
        for (set, c) in [
            (self.has_indices, 'd'),
            (self.global, 'g'),
            (self.case_insensitive, 'i'),
            (self.multi_line, 'm'),
            (self.dot_all, 's'),
            (self.unicode, 'u'),
            (self.unicode_sets, 'v'),
            (self.sticky, 'y'),
        ] {
            if set {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// First argument of a replace call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Plain string: first exact occurrence only
    Text(String),
    /// Regular expression source with flags
    Regex { source: String, flags: Flags },
}

impl Pattern {
    pub fn regex(source: impl Into<String>, flags: Flags) -> Self {
        Pattern::Regex {
            source: source.into(),
            flags,
        }
    }

    /// Parse a regex literal like `/Yale/gi`.
    pub fn parse_literal(literal: &str) -> Result<Self, TransformError> {
        let invalid = || TransformError::InvalidLiteral(literal.to_string());

        let body = literal.strip_prefix('/').ok_or_else(invalid)?;
        let end = body.rfind('/').ok_or_else(invalid)?;
        let (source, flags) = (&body[..end], &body[end + 1..]);
        if source.is_empty() {
            return Err(invalid());
        }

        Ok(Pattern::Regex {
            source: source.to_string(),
            flags: Flags::parse(flags)?,
        })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Text(text) => write!(f, "{text:?}"),
            Pattern::Regex { source, flags } => write!(f, "/{source}/{flags}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", false, false)]
    #[case("i", true, false)]
    #[case("g", false, true)]
    #[case("gi", true, true)]
    #[case("ig", true, true)]
    #[case("giu", true, true)]
    #[case("dy", false, false)]
    fn test_flags_parse(#[case] input: &str, #[case] insensitive: bool, #[case] global: bool) {
        let flags = Flags::parse(input).unwrap();
        assert_eq!(flags.case_insensitive, insensitive);
        assert_eq!(flags.global, global);
    }

    #[rstest]
    #[case("x", TransformError::UnknownFlag('x'))]
    #[case("gg", TransformError::DuplicateFlag('g'))]
    #[case("uv", TransformError::ConflictingFlags('u', 'v'))]
    fn test_flags_parse_rejects(#[case] input: &str, #[case] expected: TransformError) {
        assert_eq!(Flags::parse(input).unwrap_err(), expected);
    }

    #[rstest]
    fn test_flags_display_order() {
        let flags = Flags::parse("sig").unwrap();
        assert_eq!(flags.to_string(), "gis");
        let flags = Flags::parse("yusgid").unwrap();
        assert_eq!(flags.to_string(), "dgisuy");
    }

    #[rstest]
    #[case("/Yale/gi", "Yale", "gi")]
    #[case("/Yale/", "Yale", "")]
    #[case("/Yale/giu", "Yale", "giu")]
    #[case("/a\\/b/g", "a\\/b", "g")]
    fn test_parse_literal(#[case] literal: &str, #[case] source: &str, #[case] flags: &str) {
        let pattern = Pattern::parse_literal(literal).unwrap();
        assert_eq!(pattern, Pattern::regex(source, Flags::parse(flags).unwrap()));
        assert_eq!(pattern.to_string(), format!("/{source}/{flags}"));
    }

    #[rstest]
    #[case("Yale")]
    #[case("/Yale")]
    #[case("//g")]
    fn test_parse_literal_invalid(#[case] literal: &str) {
        assert!(matches!(
            Pattern::parse_literal(literal),
            Err(TransformError::InvalidLiteral(_))
        ));
    }
}
