//! Configuration for applang: the overrides list, logging setup and the
//! rule stores that feed the Override Resolver.

pub mod config;
pub mod logging;
pub mod store;

pub use config::{AppConfig, LogFormat, LoggingConfig, ProgramEntry};
pub use store::{ConfigRuleStore, MemoryRuleStore};
