//! Process-wide storage for the Effective Override

use crate::model::LanguageId;
use std::sync::atomic::{AtomicI16, Ordering};

/// A single word holding the Effective Override.
///
/// Written only by recomputation and read by every intercepted call. Readers
/// see either the old or the new value, never a torn one.
#[derive(Debug)]
pub struct OverrideCell(AtomicI16);

impl OverrideCell {
    pub const fn new() -> Self {
        Self(AtomicI16::new(LanguageId::SYSTEM_DEFAULT.raw()))
    }

    pub fn load(&self) -> LanguageId {
        LanguageId::new(self.0.load(Ordering::Acquire))
    }

    pub fn store(&self, value: LanguageId) {
        self.0.store(value.raw(), Ordering::Release);
    }

    /// Back to "no override"
    pub fn clear(&self) {
        self.store(LanguageId::SYSTEM_DEFAULT);
    }
}

impl Default for OverrideCell {
    fn default() -> Self {
        Self::new()
    }
}
