//! Engine configuration.
//!
//! The ambient and intro-playback presences are the same engine with
//! different presets; see [`PresenceConfig::ambient`] and
//! [`PresenceConfig::intro`].

use crate::constants::*;
use crate::error::ConfigError;

/// Whether a session cycles through idle/listening/talking forever or ends
/// in a terminal `Done` state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SessionMode {
    #[default]
    Looping,
    OneShot,
}

#[derive(Clone, Debug)]
pub struct EnvelopeConfig {
    pub fast_rate: f32,
    pub slow_rate: f32,
    pub smooth_rate: f32,
    pub onset_gain: f32,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            fast_rate: ENVELOPE_FAST_RATE,
            slow_rate: ENVELOPE_SLOW_RATE,
            smooth_rate: ENVELOPE_SMOOTH_RATE,
            onset_gain: ONSET_GAIN,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SwarmConfig {
    pub particle_count: usize,
    pub radius_min: f32,
    pub radius_max: f32,
    pub omega_talk: (f32, f32),
    pub omega_rest: f32,
    pub cognitive_weight: f32,
    pub social_talk: (f32, f32),
    pub social_rest: f32,
    pub personal_best_rate: f32,
    pub rest_inward_pull: f32,
    pub turbulence: f32,
    pub breath_depth: f32,
    pub base_drift: f32,
    pub angular_gain: f32,
    pub spin_rest: f32,
    pub spin_talk: f32,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            radius_min: RADIUS_MIN,
            radius_max: RADIUS_MAX,
            omega_talk: (OMEGA_TALK_START, OMEGA_TALK_END),
            omega_rest: OMEGA_REST,
            cognitive_weight: COGNITIVE_WEIGHT,
            social_talk: (SOCIAL_TALK_START, SOCIAL_TALK_END),
            social_rest: SOCIAL_REST,
            personal_best_rate: PERSONAL_BEST_RATE,
            rest_inward_pull: REST_INWARD_PULL,
            turbulence: TURBULENCE_BASE,
            breath_depth: BREATH_DEPTH,
            base_drift: BASE_DRIFT,
            angular_gain: ANGULAR_GAIN_BASE,
            spin_rest: SPIN_REST,
            spin_talk: SPIN_TALK,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PresenceConfig {
    pub mode: SessionMode,
    pub refresh_rate_hz: f64,
    pub hesitation_ramp_sec: f64,
    /// Base pixel radius as a fraction of the shorter surface side.
    pub base_radius_fraction: f32,
    pub envelope: EnvelopeConfig,
    pub swarm: SwarmConfig,
    /// Seed for the particle RNG; `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            mode: SessionMode::Looping,
            refresh_rate_hz: DEFAULT_REFRESH_RATE_HZ,
            hesitation_ramp_sec: HESITATION_RAMP_SEC,
            base_radius_fraction: BASE_RADIUS_FRACTION,
            envelope: EnvelopeConfig::default(),
            swarm: SwarmConfig::default(),
            seed: None,
        }
    }
}

impl PresenceConfig {
    /// Open-ended conversation presence.
    pub fn ambient() -> Self {
        Self::default()
    }

    /// One-shot intro playback presence that ends in `Done`.
    pub fn intro() -> Self {
        Self {
            mode: SessionMode::OneShot,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.swarm.particle_count = count;
        self
    }

    pub fn frame_step_sec(&self) -> f64 {
        1.0 / self.refresh_rate_hz
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.swarm.particle_count == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        let (min, max) = (self.swarm.radius_min, self.swarm.radius_max);
        if !(min.is_finite() && max.is_finite()) || min < 0.0 || min >= max {
            return Err(ConfigError::RadiusBand { min, max });
        }
        if !(self.refresh_rate_hz.is_finite() && self.refresh_rate_hz > 0.0) {
            return Err(ConfigError::RefreshRate(self.refresh_rate_hz));
        }
        if !(self.hesitation_ramp_sec.is_finite() && self.hesitation_ramp_sec > 0.0) {
            return Err(ConfigError::HesitationRamp(self.hesitation_ramp_sec));
        }
        let f = self.base_radius_fraction;
        if !(f > 0.0 && f <= 1.0) {
            return Err(ConfigError::BaseRadiusFraction(f));
        }
        let rates = [
            ("envelope.fast_rate", self.envelope.fast_rate),
            ("envelope.slow_rate", self.envelope.slow_rate),
            ("envelope.smooth_rate", self.envelope.smooth_rate),
            ("swarm.personal_best_rate", self.swarm.personal_best_rate),
        ];
        for (name, value) in rates {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::Rate { name, value });
            }
        }
        Ok(())
    }
}
