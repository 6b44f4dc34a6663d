//! Case-preserving mapping between the reserved pattern and its substitute.

/// Fixed table of the canonical casings (upper, capitalized, lower) of the
/// reserved pattern, each mapped to the same casing of the substitute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseTable {
    entries: [(String, String); 3],
}

impl CaseTable {
    pub fn new(pattern: &str, substitute: &str) -> Self {
        Self {
            entries: [
                (pattern.to_uppercase(), substitute.to_uppercase()),
                (capitalize(pattern), capitalize(substitute)),
                (pattern.to_lowercase(), substitute.to_lowercase()),
            ],
        }
    }

    /// Substitute for one matched occurrence.
    ///
    /// Any casing outside the table (e.g. `YaLe`) falls back to the match
    /// itself, capitalized: first letter upper, remainder lower.
    pub fn map(&self, matched: &str) -> String {
        self.entries
            .iter()
            .find(|(from, _)| from == matched)
            .map(|(_, to)| to.clone())
            .unwrap_or_else(|| capitalize(matched))
    }
}

/// First character upper-cased, remainder lower-cased.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}
