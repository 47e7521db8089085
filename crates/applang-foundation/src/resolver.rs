//! Override resolution: which language should this process report?

use crate::error::ApplangResult;
use crate::matching::PathSpec;
use crate::model::{LanguageId, RuleSet};
use crate::process::{image_path_text, ProcessIdentity};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Source of override rules.
///
/// Implementations must return a stable snapshot: one recomputation pass
/// reads exactly one `rules()` result.
pub trait RuleStore: Send + Sync {
    /// Current snapshot of the configured rules, in stored order
    fn rules(&self) -> RuleSet;

    /// Re-read rules from the backing storage
    fn reload(&self) -> ApplangResult<()> {
        Ok(())
    }
}

/// The rule that decided a resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedRule {
    pub index: usize,
    pub pattern: String,
    pub language_id: LanguageId,
}

/// Outcome of evaluating a rule set against an image path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub image_path: String,
    /// First matching rule, if any
    pub matched: Option<MatchedRule>,
    /// Indices of rules skipped because their pattern is malformed
    pub malformed: Vec<usize>,
}

impl Resolution {
    /// The Effective Override: the matched rule's language id, or the
    /// system-default sentinel when nothing matched.
    pub fn effective(&self) -> LanguageId {
        self.matched
            .as_ref()
            .map(|rule| rule.language_id)
            .unwrap_or(LanguageId::SYSTEM_DEFAULT)
    }
}

/// Evaluate `rules` against `image_path`. First match wins, evaluation stops
/// at the first empty pattern, malformed patterns never match.
pub fn resolve(rules: &RuleSet, image_path: &str) -> Resolution {
    let mut malformed = Vec::new();

    for (index, rule) in rules.active().iter().enumerate() {
        let spec = match PathSpec::parse(&rule.pattern) {
            Ok(spec) => spec,
            Err(e) => {
                debug!(index, error = %e, "Skipping malformed pattern");
                malformed.push(index);
                continue;
            }
        };

        if spec.matches(image_path) {
            debug!(index, pattern = %rule.pattern, "Rule matched");
            return Resolution {
                image_path: image_path.to_string(),
                matched: Some(MatchedRule {
                    index,
                    pattern: rule.pattern.clone(),
                    language_id: rule.language_id,
                }),
                malformed,
            };
        }

        debug!(index, pattern = %rule.pattern, "Rule did not match");
    }

    Resolution {
        image_path: image_path.to_string(),
        matched: None,
        malformed,
    }
}

/// Combines a rule store and a process identity into one decision
#[derive(Clone)]
pub struct OverrideResolver {
    store: Arc<dyn RuleStore>,
    identity: Arc<dyn ProcessIdentity>,
}

impl OverrideResolver {
    pub fn new(store: Arc<dyn RuleStore>, identity: Arc<dyn ProcessIdentity>) -> Self {
        Self { store, identity }
    }

    pub fn store(&self) -> &Arc<dyn RuleStore> {
        &self.store
    }

    /// Resolve the image path and evaluate the current rule snapshot
    pub fn recompute(&self) -> Resolution {
        let image_path = image_path_text(self.identity.as_ref());
        info!(path = %image_path, "Process image path");

        let rules = self.store.rules();
        let resolution = resolve(&rules, &image_path);

        match &resolution.matched {
            Some(rule) => info!(
                rule = rule.index,
                pattern = %rule.pattern,
                language_id = %rule.language_id,
                "Effective override resolved"
            ),
            None => info!(
                rules = rules.active().len(),
                "No rule matched, using system default"
            ),
        }

        resolution
    }
}

impl std::fmt::Debug for OverrideResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverrideResolver").finish_non_exhaustive()
    }
}
