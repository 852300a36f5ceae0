use thiserror::Error;

/// A configuration value that the engine cannot run with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("particle population must be at least 1")]
    EmptyPopulation,
    #[error("radius band [{min}, {max}] is empty or not finite")]
    RadiusBand { min: f32, max: f32 },
    #[error("refresh rate must be positive and finite, got {0}")]
    RefreshRate(f64),
    #[error("{name} must lie in (0, 1], got {value}")]
    Rate { name: &'static str, value: f32 },
    #[error("hesitation ramp must be positive, got {0}s")]
    HesitationRamp(f64),
    #[error("base radius fraction must lie in (0, 1], got {0}")]
    BaseRadiusFraction(f32),
}

/// Failures surfaced to whoever attaches or drives the engine.
///
/// Input-validity problems (out-of-range emotion, non-finite amplitude) never
/// show up here; they are clamped on ingestion.
#[derive(Debug, Error)]
pub enum PresenceError {
    #[error("output surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("audio capture setup failed: {0}")]
    AudioSetup(String),
    #[error("engine is already attached to a surface")]
    AlreadyAttached,
    #[error("surface error: {0}")]
    Surface(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
