//! Foundation Layer - rule model, path matching and override resolution
//!
//! This crate holds everything that decides *which* language a process should
//! report, independent of how the operating system queries are intercepted:
//! - Rule model (`LanguageId`, `Rule`, `RuleSet`)
//! - Glob-style path matching with `;`-separated alternatives
//! - Process image path resolution
//! - The Override Resolver and the process-wide `OverrideCell`

pub mod cell;
pub mod error;
pub mod matching;
pub mod model;
pub mod process;
pub mod resolver;

// Re-export commonly used types for convenience
pub use cell::OverrideCell;
pub use error::{ApplangError, ApplangResult};
pub use matching::PathSpec;
pub use model::{LanguageId, Rule, RuleSet};
pub use process::{CurrentProcess, FixedProcess, ProcessIdentity};
pub use resolver::{resolve, MatchedRule, OverrideResolver, Resolution, RuleStore};
