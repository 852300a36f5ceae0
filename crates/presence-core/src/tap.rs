//! Latest-value amplitude cell shared with audio producers.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::envelope::sanitize_amplitude;

// A NaN payload no producer can write, since pushes are sanitized.
const EMPTY: u32 = 0xFFFF_FFFF;

/// Lock-free "newest RMS" cell.
///
/// Producers on any thread call [`push`](AmplitudeTap::push); the render
/// loop calls [`take`](AmplitudeTap::take) once per tick and never blocks.
/// Older values are overwritten, not queued.
#[derive(Clone, Debug)]
pub struct AmplitudeTap {
    bits: Arc<AtomicU32>,
}

impl Default for AmplitudeTap {
    fn default() -> Self {
        Self {
            bits: Arc::new(AtomicU32::new(EMPTY)),
        }
    }
}

impl AmplitudeTap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, rms: f32) {
        let v = sanitize_amplitude(rms);
        self.bits.store(v.to_bits(), Ordering::Release);
    }

    /// Newest value since the previous `take`, if any.
    pub fn take(&self) -> Option<f32> {
        match self.bits.swap(EMPTY, Ordering::AcqRel) {
            EMPTY => None,
            bits => Some(f32::from_bits(bits)),
        }
    }

    pub fn clear(&self) {
        self.bits.store(EMPTY, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_drains_the_cell() {
        let tap = AmplitudeTap::new();
        assert_eq!(tap.take(), None);
        tap.push(0.2);
        tap.push(0.4);
        assert_eq!(tap.take(), Some(0.4));
        assert_eq!(tap.take(), None);
    }

    #[test]
    fn clones_share_the_cell() {
        let tap = AmplitudeTap::new();
        let producer = tap.clone();
        std::thread::spawn(move || producer.push(0.7))
            .join()
            .unwrap();
        assert_eq!(tap.take(), Some(0.7));
    }

    #[test]
    fn non_finite_pushes_become_silence() {
        let tap = AmplitudeTap::new();
        tap.push(f32::NAN);
        assert_eq!(tap.take(), Some(0.0));
    }
}
