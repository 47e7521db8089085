//! Test support utilities and fixtures for applang tests

pub mod helpers;
pub mod mocks;

// Re-export commonly used helpers
pub use helpers::{notepad_rules, resolver_for, stub_detours};
pub use mocks::{MockInterceptInstaller, MockProcessIdentity, MockRuleStore};
