//! Text and JSON renderings of resolutions and rule listings

use applang_foundation::{LanguageId, PathSpec, Resolution, RuleSet};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Result of `applang check`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport<'a> {
    #[serde(flatten)]
    resolution: &'a Resolution,
    effective: LanguageId,
}

impl<'a> CheckReport<'a> {
    pub fn new(resolution: &'a Resolution) -> Self {
        Self {
            resolution,
            effective: resolution.effective(),
        }
    }
}

impl fmt::Display for CheckReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Path:     {}", self.resolution.image_path)?;
        match &self.resolution.matched {
            Some(rule) => writeln!(f, "Matched:  rule {} ({})", rule.index, rule.pattern)?,
            None => writeln!(f, "Matched:  none")?,
        }
        for index in &self.resolution.malformed {
            writeln!(f, "Skipped:  rule {} (malformed pattern)", index)?;
        }
        writeln!(f, "Override: {}", self.effective)
    }
}

/// Whether a stored rule takes part in matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleStatus {
    Active,
    /// Never matches: the pattern does not parse
    Malformed,
    /// The empty pattern that ends the list
    EndOfList,
    /// Stored after the end of the list, never evaluated
    Terminated,
}

impl fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RuleStatus::Active => "active",
            RuleStatus::Malformed => "malformed",
            RuleStatus::EndOfList => "end-of-list",
            RuleStatus::Terminated => "terminated",
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleEntry {
    pub index: usize,
    pub pattern: String,
    pub language_id: LanguageId,
    pub status: RuleStatus,
}

/// Result of `applang rules`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleListing {
    /// Configuration file the rules came from, `None` for built-in defaults
    pub config: Option<PathBuf>,
    pub rules: Vec<RuleEntry>,
}

impl RuleListing {
    pub fn new(config: Option<PathBuf>, rules: &RuleSet) -> Self {
        let mut ended = false;
        let rules = rules
            .all()
            .iter()
            .enumerate()
            .map(|(index, rule)| {
                let status = if ended {
                    RuleStatus::Terminated
                } else if rule.is_terminator() {
                    ended = true;
                    RuleStatus::EndOfList
                } else if PathSpec::parse(&rule.pattern).is_err() {
                    RuleStatus::Malformed
                } else {
                    RuleStatus::Active
                };

                RuleEntry {
                    index,
                    pattern: rule.pattern.clone(),
                    language_id: rule.language_id,
                    status,
                }
            })
            .collect();

        Self { config, rules }
    }
}

impl fmt::Display for RuleListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.config {
            Some(path) => writeln!(f, "Configuration: {}", path.display())?,
            None => writeln!(f, "Configuration: (built-in defaults)")?,
        }

        if self.rules.is_empty() {
            return writeln!(f, "No rules configured");
        }

        writeln!(f, "{:>3}  {:<6}  {:<11}  PATTERN", "#", "LANGID", "STATUS")?;
        for entry in &self.rules {
            writeln!(
                f,
                "{:>3}  {:<6}  {:<11}  {}",
                entry.index,
                entry.language_id.raw(),
                entry.status.to_string(),
                entry.pattern
            )?;
        }
        Ok(())
    }
}
