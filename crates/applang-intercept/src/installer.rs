//! Installing the intercepts: capability trait and atomic installation

use crate::entry_point::EntryPoint;
use crate::error::{InterceptError, InterceptResult};
use crate::state::InterceptState;
use tracing::{debug, error, info};

/// Wrapper function to install for each entry point
pub type DetourTable = [(EntryPoint, usize); 3];

/// Platform capability for redirecting an entry point to a wrapper.
///
/// Installation is two-phase: `install` stages a redirect and hands back the
/// address that still reaches the original implementation, `commit` makes
/// every staged redirect live. Originals are therefore published before any
/// wrapper can run.
pub trait InterceptInstaller: Send {
    /// Stage a redirect of `entry` to `detour`; returns the original's address
    fn install(&mut self, entry: EntryPoint, detour: *const ()) -> InterceptResult<*const ()>;

    /// Activate every staged redirect
    fn commit(&mut self) -> InterceptResult<()>;

    /// Remove every redirect, staged or live
    fn uninstall_all(&mut self);
}

/// Install every entry in `detours`, or none of them.
///
/// On success the originals are published in `state`. On any failure all
/// redirects are removed and `state` forgets the originals.
pub fn install_all(
    installer: &mut dyn InterceptInstaller,
    detours: &DetourTable,
    state: &InterceptState,
) -> InterceptResult<()> {
    let result = stage_and_commit(installer, detours, state);

    if let Err(e) = &result {
        error!(error = %e, "Installation failed, rolling back");
        installer.uninstall_all();
        state.forget_originals();
    }

    result
}

fn stage_and_commit(
    installer: &mut dyn InterceptInstaller,
    detours: &DetourTable,
    state: &InterceptState,
) -> InterceptResult<()> {
    for &(entry, detour) in detours {
        let original = installer.install(entry, detour as *const ())?;
        if original.is_null() {
            return Err(InterceptError::install(
                entry.name(),
                "installer returned a null original",
            ));
        }
        state.set_original(entry, original as usize);
        debug!(entry = %entry, "Intercept staged");
    }

    installer.commit()?;
    info!(count = detours.len(), "UI language queries intercepted");
    Ok(())
}

/// Installer for platforms without detour support. Every install fails, so
/// activation reports "not active".
#[derive(Debug, Default)]
pub struct UnsupportedInstaller;

impl InterceptInstaller for UnsupportedInstaller {
    fn install(&mut self, _entry: EntryPoint, _detour: *const ()) -> InterceptResult<*const ()> {
        Err(InterceptError::Unsupported)
    }

    fn commit(&mut self) -> InterceptResult<()> {
        Err(InterceptError::Unsupported)
    }

    fn uninstall_all(&mut self) {}
}

/// The installer for the current platform
pub fn platform_installer() -> Box<dyn InterceptInstaller> {
    #[cfg(all(windows, any(target_arch = "x86", target_arch = "x86_64")))]
    {
        Box::new(crate::kernel::KernelInstaller::new())
    }

    #[cfg(not(all(windows, any(target_arch = "x86", target_arch = "x86_64"))))]
    {
        Box::new(UnsupportedInstaller)
    }
}
