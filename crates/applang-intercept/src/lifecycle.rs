//! Host lifecycle: activation, settings changes and deactivation

use crate::hooks;
use crate::installer::{install_all, DetourTable, InterceptInstaller};
use crate::state::InterceptState;
use applang_foundation::{OverrideResolver, Resolution};
use tracing::{error, info, warn};

/// The per-app language override as seen by the host.
///
/// Every entry point degrades instead of failing: the host application never
/// sees an error, at worst the queries behave as if nothing were installed.
pub struct LanguageMod {
    state: &'static InterceptState,
    detours: DetourTable,
    resolver: OverrideResolver,
    installer: Box<dyn InterceptInstaller>,
    active: bool,
}

impl LanguageMod {
    /// A mod driving the process-wide wrappers in [`hooks`]
    pub fn new(resolver: OverrideResolver, installer: Box<dyn InterceptInstaller>) -> Self {
        Self::with_state(&hooks::STATE, hooks::detour_table(), resolver, installer)
    }

    pub fn with_state(
        state: &'static InterceptState,
        detours: DetourTable,
        resolver: OverrideResolver,
        installer: Box<dyn InterceptInstaller>,
    ) -> Self {
        Self {
            state,
            detours,
            resolver,
            installer,
            active: false,
        }
    }

    /// Activation: compute the first decision, then intercept all three
    /// queries. Returns `false`, with nothing intercepted, if any of them
    /// could not be installed.
    pub fn init(&mut self) -> bool {
        info!("Initializing per-app language override");

        self.recompute();

        match install_all(self.installer.as_mut(), &self.detours, self.state) {
            Ok(()) => {
                self.active = true;
                true
            }
            Err(e) => {
                error!(error = %e, "Hook failed, override inactive");
                self.state.reset();
                self.active = false;
                false
            }
        }
    }

    pub fn after_init(&self) {
        info!(active = self.active, "Initialization complete");
    }

    /// The rule list changed: reload it and recompute in full.
    ///
    /// An inactive mod still reports the new decision but never publishes
    /// it, so a failed activation stays inert.
    pub fn settings_changed(&self) -> Resolution {
        info!("Settings changed");

        if let Err(e) = self.resolver.store().reload() {
            warn!(error = %e, "Reload failed, continuing with an empty rule list");
        }

        if self.active {
            self.recompute()
        } else {
            warn!("Intercepts not installed, override not applied");
            self.resolver.recompute()
        }
    }

    pub fn before_uninit(&self) {
        info!("Uninitializing");
    }

    /// Deactivation: remove the intercepts and forget all state
    pub fn uninit(&mut self) {
        info!("Unloaded");
        if self.active {
            self.installer.uninstall_all();
            self.active = false;
        }
        self.state.reset();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn state(&self) -> &'static InterceptState {
        self.state
    }

    fn recompute(&self) -> Resolution {
        self.state.recompute(&self.resolver)
    }
}

impl std::fmt::Debug for LanguageMod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageMod")
            .field("active", &self.active)
            .field("current", &self.state.current_override())
            .finish_non_exhaustive()
    }
}
