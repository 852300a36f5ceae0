//! Audio envelope extraction.
//!
//! Three exponential moving averages of the per-frame RMS amplitude at
//! different rates. `smooth` is the calm energy used by the background and
//! the swarm target; `fast - slow` is the onset proxy for syllable-like
//! loudness spikes.

use crate::config::EnvelopeConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EnvelopeState {
    pub fast: f32,
    pub slow: f32,
    pub smooth: f32,
}

#[derive(Clone, Debug)]
pub struct EnvelopeTracker {
    cfg: EnvelopeConfig,
    state: EnvelopeState,
}

impl EnvelopeTracker {
    pub fn new(cfg: EnvelopeConfig) -> Self {
        Self {
            cfg,
            state: EnvelopeState::default(),
        }
    }

    /// Advance all accumulators by one frame.
    ///
    /// Missing or non-finite amplitudes are treated as silence so the
    /// envelope still advances every frame.
    pub fn update(&mut self, amplitude: Option<f32>) {
        let a = sanitize_amplitude(amplitude.unwrap_or(0.0));
        let s = &mut self.state;
        s.fast += (a - s.fast) * self.cfg.fast_rate;
        s.slow += (a - s.slow) * self.cfg.slow_rate;
        s.smooth += (a - s.smooth) * self.cfg.smooth_rate;
    }

    pub fn reset(&mut self) {
        self.state = EnvelopeState::default();
    }

    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    pub fn energy(&self) -> f32 {
        self.state.smooth
    }

    pub fn onset(&self) -> f32 {
        ((self.state.fast - self.state.slow) * self.cfg.onset_gain).clamp(0.0, 1.0)
    }
}

#[inline]
pub fn sanitize_amplitude(a: f32) -> f32 {
    if a.is_finite() {
        a.max(0.0)
    } else {
        0.0
    }
}

/// Root-mean-square of a block of samples; 0 for an empty block.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples
        .iter()
        .filter(|s| s.is_finite())
        .map(|&s| {
            let f = s as f64;
            f * f
        })
        .sum();
    (sum / samples.len() as f64).sqrt() as f32
}
