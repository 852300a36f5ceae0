/// Envelope, swarm and colour tuning constants.
///
/// These are the empirically tuned defaults behind `PresenceConfig::default()`.
/// None of them is load-bearing on its own; the qualitative behaviour (stable
/// envelopes, bounded radii, a contracted resting ring) is what matters.

// Frame clock
pub const DEFAULT_REFRESH_RATE_HZ: f64 = 60.0;
pub const DEFAULT_PARTICLE_COUNT: usize = 420;

// Envelope smoothing rates (fraction of the gap closed per frame)
pub const ENVELOPE_FAST_RATE: f32 = 0.35;
pub const ENVELOPE_SLOW_RATE: f32 = 0.06;
pub const ENVELOPE_SMOOTH_RATE: f32 = 0.045;
pub const ONSET_GAIN: f32 = 10.0; // onset = (fast - slow) * gain, clamped to [0, 1]

// Hesitation ramp after entering talking
pub const HESITATION_RAMP_SEC: f64 = 0.26;

// Radius band in units of the base pixel radius
pub const RADIUS_MIN: f32 = 0.05;
pub const RADIUS_MAX: f32 = 1.75;
pub const INITIAL_RADIUS_JITTER: f32 = 0.2; // particles spawn in 1 +/- jitter/2

// Global target radius mapping
pub const TARGET_ENERGY_BASE: f32 = 0.8;
pub const TARGET_ENERGY_AROUSAL: f32 = 0.6;
pub const TARGET_ONSET_GAIN: f32 = 0.4;
pub const REST_INWARD_PULL: f32 = 0.08; // contraction toward centre while not talking

// Swarm weights
pub const OMEGA_TALK_START: f32 = 0.975;
pub const OMEGA_TALK_END: f32 = 0.955;
pub const OMEGA_REST: f32 = 0.99;
pub const COGNITIVE_WEIGHT: f32 = 0.035;
pub const SOCIAL_TALK_START: f32 = 0.015;
pub const SOCIAL_TALK_END: f32 = 0.055;
pub const SOCIAL_REST: f32 = 0.015;
pub const SOCIAL_DOMINANCE_BASE: f32 = 0.8;
pub const SOCIAL_DOMINANCE_SPAN: f32 = 0.6;
pub const PERSONAL_BEST_RATE: f32 = 0.0015;

// Organic motion
pub const TURBULENCE_BASE: f32 = 0.006;
pub const TURBULENCE_AROUSAL_BASE: f32 = 0.25;
pub const TURBULENCE_AROUSAL_SPAN: f32 = 1.2;
pub const NOISE_ANGLE_SCALE: f32 = 3.0;
pub const NOISE_TIME_SCALE: f32 = 0.55;
pub const BREATH_RATE: f32 = 1.2; // rad/sec
pub const BREATH_DEPTH: f32 = 0.018;

// Angular motion (radians per frame)
pub const BASE_DRIFT: f32 = 0.000_12;
pub const ANGULAR_GAIN_BASE: f32 = 0.0035;
pub const ANGULAR_GAIN_DOMINANCE: f32 = 0.8; // gain *= 0.6 + dominance * this
pub const SPIN_REST: f32 = 0.000_25;
pub const SPIN_TALK: f32 = 0.0009;

// Colour mapping (degrees)
pub const HUE_LOW_VALENCE: f32 = 228.0; // cool blue when negative
pub const HUE_HIGH_VALENCE: f32 = 38.0; // warm amber when positive
pub const HUE_BREATH_SHIFT: f32 = 8.0;
pub const HUE_BREATH_RATE: f32 = 0.35;
pub const HUE_SEED_SPREAD: f32 = 24.0;

// Particle opacity
pub const ALPHA_BASE: f32 = 0.22;
pub const ALPHA_VALENCE: f32 = 0.25;
pub const ALPHA_ONSET: f32 = 0.12;
pub const ALPHA_MIN: f32 = 0.15;
pub const ALPHA_MAX: f32 = 0.65;

// Surface geometry
pub const BASE_RADIUS_FRACTION: f32 = 0.22; // of the short surface side
pub const DOT_CORE_RADIUS_PX: f32 = 1.3; // CSS px, scaled by pixel ratio
pub const DOT_HALO_SCALE: f32 = 3.2;
pub const DOT_HALO_ALPHA: f32 = 0.18;
pub const DOT_ONSET_GROWTH: f32 = 0.6;
