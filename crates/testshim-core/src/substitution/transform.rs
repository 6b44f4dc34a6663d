//! The replace operation and its default regex-backed implementation.

use crate::substitution::pattern::{Flags, Pattern};
use regex::{Captures, Regex, RegexBuilder};
use std::ops::Range;
use thiserror::Error;

/// Errors raised by [`RegexTransform`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    #[error("invalid regular expression: {0}")]
    InvalidRegex(#[from] regex::Error),
    #[error("invalid regular expression literal: {0}")]
    InvalidLiteral(String),
    #[error("unknown regular expression flag: {0}")]
    UnknownFlag(char),
    #[error("duplicate regular expression flag: {0}")]
    DuplicateFlag(char),
    #[error("regular expression flags {0} and {1} cannot be combined")]
    ConflictingFlags(char, char),
}

/// A `replace(pattern, replacement)` operation over a subject string.
pub trait TextTransform {
    type Error;

    fn replace(
        &self,
        subject: &str,
        pattern: &Pattern,
        replacement: &str,
    ) -> Result<String, Self::Error>;
}

/// Regex-backed replace mirroring JavaScript `String.prototype.replace`:
/// a global regex replaces every match, anything else only the first one.
/// `$$`, `$&`, `` $` ``, `$'`, `$n` and `$<name>` in the replacement expand
/// the way they do in JavaScript.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexTransform;

impl RegexTransform {
    /// Build a regex for `source`. `u` and `v` are always on in the regex
    /// crate, and `d` only changes match objects, so neither affects the build.
    pub fn compile(source: &str, flags: Flags) -> Result<Regex, TransformError> {
        let regex = RegexBuilder::new(source)
            .case_insensitive(flags.case_insensitive)
            .multi_line(flags.multi_line)
            .dot_matches_new_line(flags.dot_all)
            .build()?;
        Ok(regex)
    }
}

impl TextTransform for RegexTransform {
    type Error = TransformError;

    fn replace(
        &self,
        subject: &str,
        pattern: &Pattern,
        replacement: &str,
    ) -> Result<String, TransformError> {
        let mut out = String::with_capacity(subject.len());
        let mut last = 0;
        match pattern {
            Pattern::Text(text) => {
                if let Some(start) = subject.find(text.as_str()) {
                    let found = Found {
                        subject,
                        range: start..start + text.len(),
                        captures: None,
                        named: false,
                    };
                    out.push_str(&subject[..start]);
                    found.expand(replacement, &mut out);
                    last = found.range.end;
                }
            }
            Pattern::Regex { source, flags } => {
                let regex = Self::compile(source, *flags)?;
                let named = regex.capture_names().flatten().next().is_some();
                for caps in regex.captures_iter(subject) {
                    let Some(whole) = caps.get(0) else {
                        continue;
                    };
                    if flags.sticky && whole.start() != last {
                        break;
                    }
                    out.push_str(&subject[last..whole.start()]);
                    let found = Found {
                        subject,
                        range: whole.range(),
                        captures: Some(&caps),
                        named,
                    };
                    found.expand(replacement, &mut out);
                    last = whole.end();
                    if !flags.global {
                        break;
                    }
                }
            }
        }
        out.push_str(&subject[last..]);
        Ok(out)
    }
}

/// One match, as seen by the replacement template.
struct Found<'s, 'c> {
    subject: &'s str,
    range: Range<usize>,
    captures: Option<&'c Captures<'s>>,
    /// `$<name>` is only special when the regex has named groups
    named: bool,
}

impl<'s> Found<'s, '_> {
    fn expand(&self, template: &str, out: &mut String) {
        let mut rest = template;
        while let Some(i) = rest.find('$') {
            out.push_str(&rest[..i]);
            let tail = &rest[i + 1..];
            let consumed = match tail.as_bytes().first() {
                Some(b'$') => {
                    out.push('$');
                    1
                }
                Some(b'&') => {
                    out.push_str(&self.subject[self.range.clone()]);
                    1
                }
                Some(b'`') => {
                    out.push_str(&self.subject[..self.range.start]);
                    1
                }
                Some(b'\'') => {
                    out.push_str(&self.subject[self.range.end..]);
                    1
                }
                Some(b'0'..=b'9') => match self.numbered(tail) {
                    Some((len, text)) => {
                        out.push_str(text);
                        len
                    }
                    None => {
                        out.push('$');
                        0
                    }
                },
                Some(b'<') if self.named => match tail.find('>') {
                    Some(close) => {
                        out.push_str(self.name(&tail[1..close]));
                        close + 1
                    }
                    None => {
                        out.push('$');
                        0
                    }
                },
                _ => {
                    out.push('$');
                    0
                }
            };
            rest = &tail[consumed..];
        }
        out.push_str(rest);
    }

    /// `$nn` or `$n` at the start of `tail`: two digits win when they name
    /// an existing group. Returns the digits consumed and the group text.
    fn numbered(&self, tail: &str) -> Option<(usize, &'s str)> {
        let count = self.captures.map_or(0, |caps| caps.len() - 1);
        let digits: Vec<usize> = tail
            .bytes()
            .take(2)
            .take_while(u8::is_ascii_digit)
            .map(|b| usize::from(b - b'0'))
            .collect();
        if let &[tens, ones] = digits.as_slice() {
            let n = tens * 10 + ones;
            if (1..=count).contains(&n) {
                return Some((2, self.group(n)));
            }
        }
        let n = *digits.first()?;
        (1..=count).contains(&n).then(|| (1, self.group(n)))
    }

    /// Unmatched groups expand to nothing.
    fn group(&self, n: usize) -> &'s str {
        self.captures
            .and_then(|caps| caps.get(n))
            .map_or("", |m| m.as_str())
    }

    fn name(&self, name: &str) -> &'s str {
        self.captures
            .and_then(|caps| caps.name(name))
            .map_or("", |m| m.as_str())
    }
}
