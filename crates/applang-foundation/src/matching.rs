//! Glob-style matching of executable paths
//!
//! A rule pattern is one or more globs separated by `;`. Each alternative is
//! matched against the *full* image path, case-insensitively:
//!
//! - `*` matches any run of characters, path separators included
//! - `?` matches exactly one character
//!
//! Every other character, `[` and `]` included, matches itself. Leading
//! whitespace of an alternative is ignored and empty alternatives (e.g. from
//! a trailing `;`) are skipped.
//!
//! Case folding is per character: a character whose lowercase form is more
//! than one character (`İ`) is compared as written, so `?` still stands for
//! exactly one character of the path.

use crate::error::{ApplangError, ApplangResult};
use glob::{MatchOptions, Pattern};

const SEPARATOR: char = ';';

const OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// A compiled, possibly multi-alternative path pattern
#[derive(Debug, Clone)]
pub struct PathSpec {
    alternatives: Vec<Pattern>,
}

impl PathSpec {
    /// Compile a pattern. Fails if any alternative contains a NUL character,
    /// which no path passed to the language queries' callers can hold.
    pub fn parse(source: &str) -> ApplangResult<Self> {
        let mut alternatives = Vec::new();

        for raw in source.split(SEPARATOR) {
            let alternative = raw.trim_start();
            if alternative.is_empty() {
                continue;
            }

            if alternative.contains('\0') {
                return Err(ApplangError::pattern(source, "embedded NUL character"));
            }

            let normalized = normalize(alternative);
            let pattern = Pattern::new(&normalized)
                .map_err(|e| ApplangError::pattern(source, e.msg))?;
            alternatives.push(pattern);
        }

        Ok(Self { alternatives })
    }

    /// True when `path` matches any alternative
    pub fn matches(&self, path: &str) -> bool {
        if path.is_empty() {
            return false;
        }

        let folded: String = path.chars().map(fold).collect();
        self.alternatives
            .iter()
            .any(|pattern| pattern.matches_with(&folded, OPTIONS))
    }
}

/// Lowercase `c` unless that would change its length in characters
fn fold(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

/// Case-fold, collapse `*` runs and escape glob metacharacters other than
/// `*` and `?`. `**` has no special meaning here, and collapsing keeps it
/// from being read as a recursive wildcard.
fn normalize(alternative: &str) -> String {
    let mut out = String::with_capacity(alternative.len());
    let mut previous_star = false;

    for c in alternative.chars().map(fold) {
        if c == '*' && previous_star {
            continue;
        }
        previous_star = c == '*';
        match c {
            '[' => out.push_str("[[]"),
            ']' => out.push_str("[]]"),
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Malformed patterns never match
    fn path_matches(pattern: &str, path: &str) -> bool {
        PathSpec::parse(pattern)
            .map(|spec| spec.matches(path))
            .unwrap_or(false)
    }

    #[test]
    fn test_matches_case_insensitively() {
        assert!(path_matches("*\\APP.EXE", "C:\\dir\\app.exe"));
        assert!(path_matches("*\\app.exe", "C:\\DIR\\APP.EXE"));
    }

    #[test]
    fn test_matches_full_path_not_base_name() {
        assert!(!path_matches("app.exe", "C:\\dir\\app.exe"));
        assert!(path_matches("C:\\dir\\app.exe", "C:\\dir\\app.exe"));
    }

    #[test]
    fn test_star_crosses_directories() {
        assert!(path_matches(
            "C:\\Program Files\\*.exe",
            "C:\\Program Files\\Vendor\\Tool\\tool.exe"
        ));
    }

    #[test]
    fn test_question_mark_matches_single_character() {
        assert!(path_matches("*\\app?.exe", "C:\\dir\\app2.exe"));
        assert!(!path_matches("*\\app?.exe", "C:\\dir\\app.exe"));
        assert!(!path_matches("*\\app?.exe", "C:\\dir\\app10.exe"));
    }

    #[test]
    fn test_semicolon_alternatives() {
        let spec = PathSpec::parse("*\\a.exe;*\\b.exe").unwrap();
        assert!(spec.matches("D:\\tools\\a.exe"));
        assert!(spec.matches("D:\\tools\\b.exe"));
        assert!(!spec.matches("D:\\tools\\c.exe"));
    }

    #[test]
    fn test_alternatives_ignore_leading_whitespace_and_empties() {
        let spec = PathSpec::parse("*\\a.exe;  *\\b.exe;;").unwrap();
        assert!(spec.matches("D:\\b.exe"));
        assert!(!spec.matches("D:\\c.exe"));
    }

    #[test]
    fn test_double_star_is_plain_star() {
        assert!(path_matches("C:\\**\\app.exe", "C:\\x\\y\\app.exe"));
        assert!(path_matches("**app.exe", "C:\\app.exe"));
    }

    #[test]
    fn test_brackets_are_literal() {
        let path = "C:\\Games\\[Steam]\\game.exe";
        assert!(path_matches(path, path));
        assert!(path_matches("*\\[steam]\\*.exe", path));
        assert!(path_matches("*\\[app.exe", "C:\\[app.exe"));
        assert!(!path_matches("*\\setup[0-9].exe", "C:\\setup7.exe"));
        assert!(path_matches("*\\setup[0-9].exe", "C:\\setup[0-9].exe"));
    }

    #[test]
    fn test_embedded_nul_is_malformed() {
        let err = PathSpec::parse("*\\app\0.exe").unwrap_err();
        assert!(matches!(err, ApplangError::Pattern { .. }));
        assert!(!path_matches("*\\app\0.exe", "C:\\app\0.exe"));
    }

    #[test]
    fn test_one_bad_alternative_spoils_the_rule() {
        assert!(PathSpec::parse("*\\ok.exe;*\\bad\0.exe").is_err());
    }

    #[test]
    fn test_empty_path_never_matches() {
        assert!(!path_matches("*", ""));
    }

    #[test]
    fn test_pattern_of_only_separators_matches_nothing() {
        let spec = PathSpec::parse(" ; ;").unwrap();
        assert!(!spec.matches("C:\\app.exe"));
    }

    #[test]
    fn test_non_ascii_case_folding() {
        assert!(path_matches("*\\ÜBERSICHT.EXE", "C:\\Programme\\übersicht.exe"));
    }

    #[test]
    fn test_question_mark_against_multi_char_lowercase() {
        assert!(path_matches("C:\\?\\app.exe", "C:\\İ\\app.exe"));
        assert!(path_matches("C:\\İ\\app.exe", "C:\\İ\\APP.EXE"));
    }
}
