//! Entry-Point Interception Layer
//!
//! Redirects `GetUserDefaultUILanguage`, `GetUserDefaultLangID` and
//! `GetUserDefaultLCID` to wrappers that report the Effective Override, and
//! drives the host lifecycle (activation, settings changes, deactivation).
//!
//! The redirect mechanism sits behind [`InterceptInstaller`]; on Windows
//! x86/x86-64 it is [`kernel::KernelInstaller`], elsewhere activation fails
//! cleanly with [`InterceptError::Unsupported`].

pub mod entry_point;
pub mod error;
pub mod hooks;
pub mod installer;
pub mod lifecycle;
pub mod state;

#[cfg(all(windows, any(target_arch = "x86", target_arch = "x86_64")))]
pub mod kernel;

pub use entry_point::EntryPoint;
pub use error::{InterceptError, InterceptResult};
pub use installer::{install_all, platform_installer, DetourTable, InterceptInstaller, UnsupportedInstaller};
pub use lifecycle::LanguageMod;
pub use state::InterceptState;
