//! Platform-free core of the affective presence renderer.
//!
//! Audio amplitude and a valence/arousal/dominance estimate go in; a
//! [`Scene`] of background gradient and soft particle dots comes out, once
//! per tick. The native and web front ends supply the surface, the audio
//! capture and the scheduling.

pub mod budget;
pub mod color;
pub mod config;
pub mod constants;
pub mod emotion;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod field;
pub mod noise;
pub mod scene;
pub mod state;
pub mod surface;
pub mod tap;

pub use budget::FrameStats;
pub use config::{PresenceConfig, SessionMode};
pub use emotion::{EmotionAxis, EmotionVector};
pub use engine::{EngineSnapshot, PresenceEngine, TickOutcome};
pub use envelope::{rms, EnvelopeState, EnvelopeTracker};
pub use error::{ConfigError, PresenceError};
pub use field::{Particle, ParticleField, ParticleSprite, Viewport};
pub use noise::noise1;
pub use scene::{Background, BlendMode, Dot, Scene, SurfaceSize};
pub use state::{PresenceState, PresenceStateMachine, Transition};
pub use surface::{AudioCapture, PresenceSurface};
pub use tap::AmplitudeTap;

// Shader bundled as a string constant for GPU front ends
pub static PRESENCE_WGSL: &str = include_str!("../shaders/presence.wgsl");
