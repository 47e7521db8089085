//! Injectable module exporting the host lifecycle.
//!
//! The loader calls `applang_mod_init` once the module is mapped into the
//! target process, `applang_mod_settings_changed` whenever the user edits the
//! overrides list and `applang_mod_uninit` before unloading. None of these
//! ever unwinds into the host: a panic is logged and reported as failure.

use applang_config::config::{self, AppConfig};
use applang_config::{logging, ConfigRuleStore};
use applang_foundation::{CurrentProcess, OverrideResolver};
use applang_intercept::{platform_installer, LanguageMod};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{error, warn};

static MOD: Mutex<Option<LanguageMod>> = Mutex::new(None);

fn instance() -> MutexGuard<'static, Option<LanguageMod>> {
    MOD.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Run `f`, turning a panic into `fallback`
fn guarded<T>(entry: &str, fallback: T, f: impl FnOnce() -> T) -> T {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(_) => {
            error!(entry, "Panic in lifecycle entry point");
            fallback
        }
    }
}

/// Build the mod from the on-disk configuration and activate it.
///
/// A configuration that cannot be loaded leaves the process with an empty
/// rule list, so every query reports the system default.
pub fn activate() -> bool {
    let path = config::locate(None);
    let loaded = AppConfig::load_from(path.as_deref());

    let config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => AppConfig::default(),
    };
    logging::initialize(&config.logging);
    if let Err(e) = &loaded {
        warn!(error = %e, "Configuration unavailable, no overrides apply");
    }

    let store = Arc::new(ConfigRuleStore::from_config(path, &config));
    let resolver = OverrideResolver::new(store, Arc::new(CurrentProcess));

    let mut slot = instance();
    if let Some(mut previous) = slot.take() {
        previous.uninit();
    }

    let mut language_mod = LanguageMod::new(resolver, platform_installer());
    let active = language_mod.init();
    *slot = Some(language_mod);
    active
}

pub fn after_init() {
    if let Some(language_mod) = instance().as_ref() {
        language_mod.after_init();
    }
}

pub fn settings_changed() {
    if let Some(language_mod) = instance().as_ref() {
        language_mod.settings_changed();
    }
}

pub fn before_uninit() {
    if let Some(language_mod) = instance().as_ref() {
        language_mod.before_uninit();
    }
}

pub fn deactivate() {
    if let Some(mut language_mod) = instance().take() {
        language_mod.uninit();
    }
}

/// Returns 1 when all three queries are intercepted, 0 otherwise
#[no_mangle]
pub extern "C" fn applang_mod_init() -> i32 {
    i32::from(guarded("init", false, activate))
}

#[no_mangle]
pub extern "C" fn applang_mod_after_init() {
    guarded("after_init", (), after_init)
}

#[no_mangle]
pub extern "C" fn applang_mod_settings_changed() {
    guarded("settings_changed", (), settings_changed)
}

#[no_mangle]
pub extern "C" fn applang_mod_before_uninit() {
    guarded("before_uninit", (), before_uninit)
}

#[no_mangle]
pub extern "C" fn applang_mod_uninit() {
    guarded("uninit", (), deactivate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_guarded_swallows_panics() {
        assert_eq!(guarded("test", 0, || -> i32 { panic!("boom") }), 0);
        assert_eq!(guarded("test", 0, || 7), 7);
    }

    #[test]
    #[serial]
    fn test_notifications_without_init_are_noops() {
        applang_mod_uninit();
        applang_mod_after_init();
        applang_mod_settings_changed();
        applang_mod_before_uninit();
        applang_mod_uninit();
        assert!(instance().is_none());
    }

    #[cfg(not(windows))]
    #[test]
    #[serial]
    fn test_failed_init_stays_inert() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("applang.toml");
        std::fs::write(
            &path,
            "[[programList]]\nglob = \"*\"\nlangId = 1033\n",
        )
        .unwrap();
        std::env::set_var(config::CONFIG_PATH_ENV, &path);

        assert_eq!(applang_mod_init(), 0);
        assert!(instance().as_ref().is_some_and(|m| !m.is_active()));
        assert!(applang_intercept::hooks::STATE
            .current_override()
            .is_system_default());

        applang_mod_settings_changed();
        assert!(applang_intercept::hooks::STATE
            .current_override()
            .is_system_default());

        applang_mod_uninit();
        assert!(instance().is_none());

        std::env::remove_var(config::CONFIG_PATH_ENV);
    }
}
