//! Process-wide interception state

use crate::entry_point::EntryPoint;
use applang_foundation::{LanguageId, OverrideCell, OverrideResolver, Resolution};
use std::sync::atomic::{AtomicUsize, Ordering};

/// What the intercepting wrappers read: the Effective Override and the
/// addresses that reach the original implementations.
///
/// The wrappers take no arguments, so they cannot be handed a context. One
/// instance lives in a static (see [`crate::hooks::STATE`]); only
/// `recompute` writes the override.
#[derive(Debug)]
pub struct InterceptState {
    current: OverrideCell,
    originals: [AtomicUsize; 3],
}

impl InterceptState {
    pub const fn new() -> Self {
        Self {
            current: OverrideCell::new(),
            originals: [AtomicUsize::new(0), AtomicUsize::new(0), AtomicUsize::new(0)],
        }
    }

    /// Re-evaluate the rules and publish the new Effective Override
    pub fn recompute(&self, resolver: &OverrideResolver) -> Resolution {
        let resolution = resolver.recompute();
        self.current.store(resolution.effective());
        resolution
    }

    pub fn current_override(&self) -> LanguageId {
        self.current.load()
    }

    /// Address of the original implementation, once installed
    pub fn original(&self, entry: EntryPoint) -> Option<usize> {
        match self.originals[entry.slot()].load(Ordering::Acquire) {
            0 => None,
            addr => Some(addr),
        }
    }

    pub(crate) fn set_original(&self, entry: EntryPoint, addr: usize) {
        self.originals[entry.slot()].store(addr, Ordering::Release);
    }

    pub(crate) fn forget_originals(&self) {
        for slot in &self.originals {
            slot.store(0, Ordering::Release);
        }
    }

    /// Back to the inert state: no override, nothing installed
    pub fn reset(&self) {
        self.current.clear();
        self.forget_originals();
    }

    #[cfg(test)]
    pub(crate) fn set_override(&self, value: LanguageId) {
        self.current.store(value);
    }
}

impl Default for InterceptState {
    fn default() -> Self {
        Self::new()
    }
}
