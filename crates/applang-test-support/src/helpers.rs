//! Test helper functions and fixtures

use applang_foundation::{FixedProcess, OverrideResolver, Rule, RuleSet, RuleStore};
use applang_intercept::{DetourTable, EntryPoint};
use std::path::PathBuf;
use std::sync::Arc;

/// `[("*\notepad.exe", 1033)]`
pub fn notepad_rules() -> RuleSet {
    RuleSet::new(vec![Rule::new("*\\notepad.exe", 1033)])
}

/// A resolver for a process pretending to live at `image_path`
pub fn resolver_for(store: Arc<dyn RuleStore>, image_path: &str) -> OverrideResolver {
    OverrideResolver::new(store, Arc::new(FixedProcess(PathBuf::from(image_path))))
}

/// Distinct, non-null fake wrapper addresses
pub fn stub_detours() -> DetourTable {
    EntryPoint::ALL.map(|entry| {
        let offset = EntryPoint::ALL
            .iter()
            .position(|e| *e == entry)
            .unwrap_or_default();
        (entry, 0x7000 + offset * 0x100)
    })
}
