//! Detour-based installer for the Windows kernel runtime libraries

use crate::entry_point::EntryPoint;
use crate::error::{InterceptError, InterceptResult};
use crate::installer::InterceptInstaller;
use retour::RawDetour;
use tracing::{debug, warn};
use windows::core::{w, PCSTR, PCWSTR};
use windows::Win32::System::LibraryLoader::{GetModuleHandleW, GetProcAddress};

/// Searched in order: the implementation lives in kernelbase.dll on modern
/// systems, kernel32.dll only forwards there.
const MODULES: [PCWSTR; 2] = [w!("kernelbase.dll"), w!("kernel32.dll")];

/// Find the exported implementation of `entry`
fn locate(entry: EntryPoint) -> Option<*const ()> {
    for module in MODULES {
        // SAFETY: `module` is a valid NUL-terminated wide string; the module
        // is not loaded by this call.
        let Ok(handle) = (unsafe { GetModuleHandleW(module) }) else {
            continue;
        };

        // SAFETY: the symbol is a NUL-terminated C string.
        let proc = unsafe { GetProcAddress(handle, PCSTR(entry.symbol().as_ptr().cast())) };
        if let Some(proc) = proc {
            return Some(proc as *const ());
        }
    }

    None
}

/// Installs redirects with `retour` detours. Dropping the installer removes
/// every redirect it made.
#[derive(Default)]
pub struct KernelInstaller {
    staged: Vec<(EntryPoint, RawDetour)>,
}

impl KernelInstaller {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InterceptInstaller for KernelInstaller {
    fn install(&mut self, entry: EntryPoint, detour: *const ()) -> InterceptResult<*const ()> {
        let target = locate(entry).ok_or_else(|| InterceptError::not_found(entry))?;

        // SAFETY: `target` is an exported function and `detour` a wrapper
        // with the same signature; nothing is patched until `enable`.
        let staged = unsafe { RawDetour::new(target, detour) }
            .map_err(|e| InterceptError::install(entry.name(), e.to_string()))?;
        let original = staged.trampoline() as *const ();

        debug!(entry = %entry, address = ?target, "Detour staged");
        self.staged.push((entry, staged));
        Ok(original)
    }

    fn commit(&mut self) -> InterceptResult<()> {
        for (entry, detour) in &self.staged {
            if detour.is_enabled() {
                continue;
            }
            // SAFETY: the trampoline was published before enabling, so a
            // wrapper running right away can reach the original.
            unsafe { detour.enable() }
                .map_err(|e| InterceptError::install(entry.name(), e.to_string()))?;
        }
        Ok(())
    }

    fn uninstall_all(&mut self) {
        for (entry, detour) in self.staged.drain(..) {
            if detour.is_enabled() {
                // SAFETY: restores the bytes saved by `enable`.
                if let Err(e) = unsafe { detour.disable() } {
                    warn!(entry = %entry, error = %e, "Failed to remove detour");
                }
            }
        }
    }
}

impl Drop for KernelInstaller {
    fn drop(&mut self) {
        self.uninstall_all();
    }
}
