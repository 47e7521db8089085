//! Process identity: the absolute path of the running executable image

use crate::error::{ApplangError, ApplangResult};
use std::path::PathBuf;

/// Resolves the image path of the current process
pub trait ProcessIdentity: Send + Sync {
    fn image_path(&self) -> ApplangResult<PathBuf>;
}

/// The real process, backed by `std::env::current_exe`
/// (`GetModuleFileNameW(NULL, ..)` on Windows).
#[derive(Debug, Default, Clone, Copy)]
pub struct CurrentProcess;

impl ProcessIdentity for CurrentProcess {
    fn image_path(&self) -> ApplangResult<PathBuf> {
        std::env::current_exe().map_err(|source| ApplangError::ProcessIdentity { source })
    }
}

/// A process pretending to live at a fixed path. Used for dry runs.
#[derive(Debug, Clone)]
pub struct FixedProcess(pub PathBuf);

impl ProcessIdentity for FixedProcess {
    fn image_path(&self) -> ApplangResult<PathBuf> {
        Ok(self.0.clone())
    }
}

/// Image path as matchable text. Failures degrade to an empty path, which
/// no rule matches.
pub fn image_path_text(identity: &dyn ProcessIdentity) -> String {
    match identity.image_path() {
        Ok(path) => path.to_string_lossy().into_owned(),
        Err(e) => {
            tracing::warn!(error = %e, "Process image path unavailable, no override applies");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl ProcessIdentity for Broken {
        fn image_path(&self) -> ApplangResult<PathBuf> {
            Err(ApplangError::ProcessIdentity {
                source: std::io::Error::other("no image"),
            })
        }
    }

    #[test]
    fn test_current_process_is_absolute() {
        let path = CurrentProcess.image_path().unwrap();
        assert!(path.is_absolute(), "Path should be absolute: {}", path.display());
    }

    #[test]
    fn test_fixed_process_text() {
        let identity = FixedProcess(PathBuf::from("C:\\Windows\\notepad.exe"));
        assert_eq!(image_path_text(&identity), "C:\\Windows\\notepad.exe");
    }

    #[test]
    fn test_failure_reads_as_empty_path() {
        assert_eq!(image_path_text(&Broken), "");
    }
}
