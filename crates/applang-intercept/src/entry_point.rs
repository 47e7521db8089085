//! The operating system queries that report the user's UI language

use std::ffi::CStr;
use std::fmt;

/// One intercepted "get current UI language" query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    /// `GetUserDefaultUILanguage`: UI language tag (LANGID)
    UserDefaultUiLanguage,
    /// `GetUserDefaultLangID`: user default language (LANGID)
    UserDefaultLangId,
    /// `GetUserDefaultLCID`: user default locale (LCID)
    UserDefaultLcid,
}

impl EntryPoint {
    /// Every intercepted query. Installation covers all of them or none.
    pub const ALL: [EntryPoint; 3] = [
        EntryPoint::UserDefaultUiLanguage,
        EntryPoint::UserDefaultLangId,
        EntryPoint::UserDefaultLcid,
    ];

    /// Exported symbol name
    pub fn symbol(self) -> &'static CStr {
        match self {
            EntryPoint::UserDefaultUiLanguage => c"GetUserDefaultUILanguage",
            EntryPoint::UserDefaultLangId => c"GetUserDefaultLangID",
            EntryPoint::UserDefaultLcid => c"GetUserDefaultLCID",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EntryPoint::UserDefaultUiLanguage => "GetUserDefaultUILanguage",
            EntryPoint::UserDefaultLangId => "GetUserDefaultLangID",
            EntryPoint::UserDefaultLcid => "GetUserDefaultLCID",
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            EntryPoint::UserDefaultUiLanguage => 0,
            EntryPoint::UserDefaultLangId => 1,
            EntryPoint::UserDefaultLcid => 2,
        }
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
