//! Rule model: language identifiers, override rules and ordered rule sets

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 16-bit language/locale identifier as reported by the UI language queries.
///
/// The value `-1` is the "system default" sentinel: it means "report whatever
/// the operating system would have reported".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageId(i16);

impl LanguageId {
    /// The "use system default" sentinel
    pub const SYSTEM_DEFAULT: LanguageId = LanguageId(-1);

    pub const fn new(raw: i16) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i16 {
        self.0
    }

    pub const fn is_system_default(self) -> bool {
        self.0 == -1
    }

    /// Value as returned by the 16-bit LANGID queries
    pub const fn as_lang_id(self) -> u16 {
        self.0 as u16
    }

    /// Value as returned by the 32-bit LCID query (sort ID 0)
    pub const fn as_lcid(self) -> u32 {
        self.as_lang_id() as u32
    }
}

impl Default for LanguageId {
    fn default() -> Self {
        Self::SYSTEM_DEFAULT
    }
}

impl From<i16> for LanguageId {
    fn from(raw: i16) -> Self {
        Self(raw)
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_system_default() {
            write!(f, "-1 (system default)")
        } else {
            write!(f, "{} (0x{:04X})", self.0, self.as_lang_id())
        }
    }
}

/// A single override rule: executables matching `pattern` report `language_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// File-path glob, possibly a `;`-separated union of globs
    pub pattern: String,
    /// Language to report, or the system-default sentinel
    pub language_id: LanguageId,
}

impl Rule {
    pub fn new(pattern: impl Into<String>, language_id: i16) -> Self {
        Self {
            pattern: pattern.into(),
            language_id: LanguageId::new(language_id),
        }
    }

    /// An empty pattern marks the end of the configured list
    pub fn is_terminator(&self) -> bool {
        self.pattern.is_empty()
    }
}

/// An ordered snapshot of rules. Order matters: the first match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Number of stored entries, including any past a terminator
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every stored entry, in order
    pub fn all(&self) -> &[Rule] {
        &self.rules
    }

    /// The entries that take part in evaluation: everything before the first
    /// empty pattern.
    pub fn active(&self) -> &[Rule] {
        let end = self
            .rules
            .iter()
            .position(Rule::is_terminator)
            .unwrap_or(self.rules.len());
        &self.rules[..end]
    }

    /// Pattern at `index`. Indices at or past the terminator read as empty,
    /// matching the host settings surface.
    pub fn pattern_at(&self, index: usize) -> &str {
        self.active()
            .get(index)
            .map(|rule| rule.pattern.as_str())
            .unwrap_or("")
    }

    /// Language id at `index`, or the sentinel when the index is out of range
    pub fn language_id_at(&self, index: usize) -> LanguageId {
        self.active()
            .get(index)
            .map(|rule| rule.language_id)
            .unwrap_or_default()
    }
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        Self::new(rules)
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_id_conversions() {
        let en_us = LanguageId::new(1033);
        assert_eq!(en_us.as_lang_id(), 0x0409);
        assert_eq!(en_us.as_lcid(), 0x0000_0409);
        assert!(!en_us.is_system_default());
        assert!(LanguageId::SYSTEM_DEFAULT.is_system_default());
        assert_eq!(LanguageId::default(), LanguageId::SYSTEM_DEFAULT);
    }

    #[test]
    fn test_language_id_display() {
        assert_eq!(LanguageId::new(2052).to_string(), "2052 (0x0804)");
        assert_eq!(LanguageId::SYSTEM_DEFAULT.to_string(), "-1 (system default)");
    }

    #[test]
    fn test_active_stops_at_first_empty_pattern() {
        let rules = RuleSet::new(vec![
            Rule::new("*\\a.exe", 1033),
            Rule::new("", 1041),
            Rule::new("*\\b.exe", 2052),
        ]);

        assert_eq!(rules.len(), 3);
        assert_eq!(rules.active().len(), 1);
        assert_eq!(rules.pattern_at(0), "*\\a.exe");
        assert_eq!(rules.pattern_at(1), "");
        assert_eq!(rules.pattern_at(2), "");
        assert_eq!(rules.language_id_at(0), LanguageId::new(1033));
        assert_eq!(rules.language_id_at(2), LanguageId::SYSTEM_DEFAULT);
    }

    #[test]
    fn test_rule_set_serializes_as_list() {
        let rules: RuleSet = vec![Rule::new("*\\notepad.exe", 1033)].into();
        let value = serde_json::to_value(&rules).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{ "pattern": "*\\notepad.exe", "languageId": 1033 }])
        );
    }
}
