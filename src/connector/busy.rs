//! Single-command busy flag
//!
//! Acquiring returns a guard; dropping the guard clears the flag. The flag
//! is therefore released on every exit path, including early returns, panics
//! and a dropped future.

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct BusyFlag {
    processing: AtomicBool,
}

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try the IDLE -> PROCESSING transition
    ///
    /// Returns `None` if a command is already in flight.
    pub fn try_acquire(&self) -> Option<ProcessingGuard<'_>> {
        self.processing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ProcessingGuard { flag: self })
    }

    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::Acquire)
    }
}

/// Held while a command is in flight
#[derive(Debug)]
pub struct ProcessingGuard<'a> {
    flag: &'a BusyFlag,
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.flag.processing.store(false, Ordering::Release);
    }
}
