//! The three intercepting wrappers
//!
//! Each wrapper is a branch on the cached Effective Override: the sentinel
//! forwards to the original implementation, anything else is returned as-is
//! without calling the original. Wrappers never trigger recomputation.

use crate::entry_point::EntryPoint;
use crate::installer::DetourTable;
use crate::state::InterceptState;
use applang_foundation::LanguageId;

/// State read by the wrappers
pub static STATE: InterceptState = InterceptState::new();

/// `LANG_USER_DEFAULT`, reported only if a wrapper runs without an original
const LANG_USER_DEFAULT: u16 = 0x0400;

type LangIdQuery = unsafe extern "system" fn() -> u16;
type LcidQuery = unsafe extern "system" fn() -> u32;

/// Answer a query: forward on the sentinel, substitute otherwise
pub fn answer<T>(
    current: LanguageId,
    forward: impl FnOnce() -> T,
    substitute: impl FnOnce(LanguageId) -> T,
) -> T {
    if current.is_system_default() {
        forward()
    } else {
        substitute(current)
    }
}

fn forward_lang_id(entry: EntryPoint) -> u16 {
    match STATE.original(entry) {
        Some(addr) => {
            // SAFETY: the installer published this address as the original
            // implementation of `entry`, whose signature is `LangIdQuery`.
            let original = unsafe { std::mem::transmute::<usize, LangIdQuery>(addr) };
            unsafe { original() }
        }
        None => LANG_USER_DEFAULT,
    }
}

fn forward_lcid(entry: EntryPoint) -> u32 {
    match STATE.original(entry) {
        Some(addr) => {
            // SAFETY: as above, with the `LcidQuery` signature.
            let original = unsafe { std::mem::transmute::<usize, LcidQuery>(addr) };
            unsafe { original() }
        }
        None => u32::from(LANG_USER_DEFAULT),
    }
}

pub extern "system" fn get_user_default_ui_language() -> u16 {
    answer(
        STATE.current_override(),
        || forward_lang_id(EntryPoint::UserDefaultUiLanguage),
        LanguageId::as_lang_id,
    )
}

pub extern "system" fn get_user_default_lang_id() -> u16 {
    answer(
        STATE.current_override(),
        || forward_lang_id(EntryPoint::UserDefaultLangId),
        LanguageId::as_lang_id,
    )
}

pub extern "system" fn get_user_default_lcid() -> u32 {
    answer(
        STATE.current_override(),
        || forward_lcid(EntryPoint::UserDefaultLcid),
        LanguageId::as_lcid,
    )
}

/// Wrapper for every entry point, in [`EntryPoint::ALL`] order
pub fn detour_table() -> DetourTable {
    [
        (
            EntryPoint::UserDefaultUiLanguage,
            get_user_default_ui_language as usize,
        ),
        (EntryPoint::UserDefaultLangId, get_user_default_lang_id as usize),
        (EntryPoint::UserDefaultLcid, get_user_default_lcid as usize),
    ]
}
