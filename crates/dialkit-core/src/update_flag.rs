//! Cross-thread "please recompute" signal.
//!
//! Host automation can change a parameter from the audio thread. Instead of
//! queueing the new value, that thread only raises an [`UpdateFlag`]; the UI
//! thread polls it, clears it, and re-reads the authoritative value itself.
//! No payload crosses threads, so there is nothing to race on.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag set from any thread and consumed on the UI thread.
///
/// Clones share the same underlying flag.
#[derive(Debug, Clone, Default)]
pub struct UpdateFlag {
    pending: Arc<AtomicBool>,
}

impl UpdateFlag {
    /// Create a cleared flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark that the UI needs to re-read its parameter values.
    ///
    /// Lock-free; safe to call from the audio thread.
    #[inline]
    pub fn request(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// Clear the flag, returning whether it was set.
    #[inline]
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    /// Whether an update is pending, without clearing it.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_clears() {
        let flag = UpdateFlag::new();
        assert!(!flag.take());
        flag.request();
        flag.request();
        assert!(flag.is_pending());
        assert!(flag.take());
        assert!(!flag.is_pending());
        assert!(!flag.take());
    }

    #[test]
    fn test_request_from_other_thread() {
        let flag = UpdateFlag::new();
        let audio_side = flag.clone();
        std::thread::spawn(move || audio_side.request())
            .join()
            .unwrap();
        assert!(flag.take());
    }
}
