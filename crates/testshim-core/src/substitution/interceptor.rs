//! Interceptor for the reserved `replace` call.
//!
//! Only a regex pattern whose source is exactly the reserved literal, paired
//! with exactly the reserved substitute, is intercepted. Every other call is
//! delegated untouched to the wrapped transform.

use crate::config::ShimConfig;
use crate::substitution::casing::CaseTable;
use crate::substitution::pattern::{Flags, Pattern};
use crate::substitution::transform::{RegexTransform, TextTransform};
use regex::{Captures, NoExpand, RegexBuilder};

/// Substitution policy for the reserved pattern/substitute pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedSubstitution {
    pattern: String,
    substitute: String,
    sentinel: String,
    table: CaseTable,
    nest_limit: Option<u32>,
}

impl ReservedSubstitution {
    pub fn new(
        pattern: impl Into<String>,
        substitute: impl Into<String>,
        sentinel: impl Into<String>,
    ) -> Self {
        let pattern = pattern.into();
        let substitute = substitute.into();
        let table = CaseTable::new(&pattern, &substitute);
        Self {
            pattern,
            substitute,
            sentinel: sentinel.into(),
            table,
            nest_limit: None,
        }
    }

    /// Cap the nesting depth of the matcher. A pattern nested deeper fails
    /// to build and the call falls through to the wrapped transform.
    pub fn with_nest_limit(mut self, limit: u32) -> Self {
        self.nest_limit = Some(limit);
        self
    }

    pub fn from_config(config: &ShimConfig) -> Self {
        Self::new(&config.pattern, &config.substitute, &config.sentinel)
    }

    /// Flags of the call if it targets the reserved pair.
    pub fn recognizes(&self, pattern: &Pattern, replacement: &str) -> Option<Flags> {
        match pattern {
            Pattern::Regex { source, flags }
                if *source == self.pattern && replacement == self.substitute =>
            {
                Some(*flags)
            }
            _ => None,
        }
    }

    /// Apply the policy to `subject`.
    ///
    /// A subject containing the sentinel phrase is returned as is. With the
    /// `i` flag every occurrence is replaced, keeping its casing. Without it
    /// only exact-case occurrences are replaced by the literal substitute:
    /// the first one, or all of them with `g`.
    pub fn apply(&self, subject: &str, flags: Flags) -> Result<String, regex::Error> {
        if subject.contains(&self.sentinel) {
            return Ok(subject.to_string());
        }

        let mut builder = RegexBuilder::new(&regex::escape(&self.pattern));
        builder.case_insensitive(flags.case_insensitive);
        if let Some(limit) = self.nest_limit {
            builder.nest_limit(limit);
        }
        let regex = builder.build()?;

        let replaced = if flags.case_insensitive {
            regex.replace_all(subject, |caps: &Captures<'_>| self.table.map(&caps[0]))
        } else if flags.global {
            regex.replace_all(subject, NoExpand(&self.substitute))
        } else {
            regex.replace(subject, NoExpand(&self.substitute))
        };
        Ok(replaced.into_owned())
    }
}

impl Default for ReservedSubstitution {
    fn default() -> Self {
        Self::from_config(&ShimConfig::default())
    }
}

/// [`TextTransform`] adapter applying [`ReservedSubstitution`] in front of
/// the wrapped transform.
///
/// The interceptor never produces an error of its own: if the policy fails,
/// the call falls through to the wrapped transform.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionInterceptor<T = RegexTransform> {
    inner: T,
    policy: ReservedSubstitution,
}

impl<T: TextTransform> SubstitutionInterceptor<T> {
    pub fn new(inner: T, policy: ReservedSubstitution) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn policy(&self) -> &ReservedSubstitution {
        &self.policy
    }
}

impl<T: TextTransform> TextTransform for SubstitutionInterceptor<T> {
    type Error = T::Error;

    fn replace(
        &self,
        subject: &str,
        pattern: &Pattern,
        replacement: &str,
    ) -> Result<String, T::Error> {
        if let Some(flags) = self.policy.recognizes(pattern, replacement) {
            match self.policy.apply(subject, flags) {
                Ok(result) => return Ok(result),
                Err(err) => {
                    tracing::warn!(%pattern, error = %err, "reserved substitution failed, delegating");
                }
            }
        }
        self.inner.replace(subject, pattern, replacement)
    }
}
