//! Interception errors

use crate::entry_point::EntryPoint;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterceptError {
    #[error("Entry point {entry} not found in kernelbase.dll or kernel32.dll")]
    EntryPointNotFound { entry: EntryPoint },

    #[error("Failed to intercept {target}: {message}")]
    Install { target: String, message: String },

    #[error("Intercepting UI language queries is not supported on this platform")]
    Unsupported,
}

impl InterceptError {
    pub fn not_found(entry: EntryPoint) -> Self {
        Self::EntryPointNotFound { entry }
    }

    pub fn install(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Install {
            target: target.into(),
            message: message.into(),
        }
    }
}

pub type InterceptResult<T> = Result<T, InterceptError>;
