//! Rule Store Adapter implementations

use crate::config::{locate, AppConfig};
use applang_foundation::{ApplangResult, RuleSet, RuleStore};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tracing::{error, info};

/// Rules held in memory, replaced wholesale
#[derive(Debug, Default)]
pub struct MemoryRuleStore {
    rules: RwLock<RuleSet>,
}

impl MemoryRuleStore {
    pub fn new(rules: impl Into<RuleSet>) -> Self {
        Self {
            rules: RwLock::new(rules.into()),
        }
    }

    pub fn replace(&self, rules: impl Into<RuleSet>) {
        *self.rules.write().unwrap_or_else(PoisonError::into_inner) = rules.into();
    }
}

impl RuleStore for MemoryRuleStore {
    fn rules(&self) -> RuleSet {
        self.rules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Rules read from the TOML configuration, re-read on every `reload`.
///
/// A configuration that cannot be loaded yields an empty rule list: the
/// process then behaves as if no override were configured.
#[derive(Debug)]
pub struct ConfigRuleStore {
    path: Option<PathBuf>,
    rules: RwLock<RuleSet>,
}

impl ConfigRuleStore {
    /// A store for `path` seeded from an already-loaded configuration
    pub fn from_config(path: Option<PathBuf>, config: &AppConfig) -> Self {
        Self {
            path,
            rules: RwLock::new(config.rules()),
        }
    }

    /// Locate the configuration (see [`locate`]) and load it
    pub fn open(explicit: Option<&Path>) -> Self {
        let store = Self {
            path: locate(explicit),
            rules: RwLock::new(RuleSet::default()),
        };
        // Failure is already logged and leaves the store empty
        let _ = store.reload();
        store
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl RuleStore for ConfigRuleStore {
    fn rules(&self) -> RuleSet {
        self.rules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn reload(&self) -> ApplangResult<()> {
        let loaded = AppConfig::load_from(self.path.as_deref());
        let mut rules = self.rules.write().unwrap_or_else(PoisonError::into_inner);

        match loaded {
            Ok(config) => {
                *rules = config.rules();
                info!(
                    path = ?self.path,
                    rules = rules.active().len(),
                    "Rules reloaded"
                );
                Ok(())
            }
            Err(e) => {
                error!(path = ?self.path, error = %e, "Cannot load rules, no override applies");
                *rules = RuleSet::default();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use applang_foundation::Rule;

    #[test]
    fn test_memory_store_replace() {
        let store = MemoryRuleStore::new(vec![Rule::new("*\\a.exe", 1033)]);
        assert_eq!(store.rules().len(), 1);

        store.replace(vec![]);
        assert!(store.rules().is_empty());
    }

    #[test]
    fn test_config_store_from_config() {
        let store = ConfigRuleStore::from_config(None, &AppConfig::sample());
        assert_eq!(store.rules().active().len(), 1);
        assert!(store.path().is_none());
    }
}
