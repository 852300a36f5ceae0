//! The render loop: one `tick` per display frame.
//!
//! The engine does not schedule itself. Whatever drives it (a
//! `requestAnimationFrame` callback, a winit redraw, a test loop) calls
//! [`PresenceEngine::tick`]; each call advances a fixed-step clock, updates
//! the envelope, steps the particle field and hands a [`Scene`] to the
//! attached surface.

use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::budget::{FrameBudget, FrameStats};
use crate::config::PresenceConfig;
use crate::emotion::EmotionVector;
use crate::envelope::{EnvelopeState, EnvelopeTracker};
use crate::error::PresenceError;
use crate::field::{FieldInput, ParticleField, Viewport};
use crate::scene::{fill_dot_passes, Background, BlendMode, Dot, Scene, SurfaceSize};
use crate::state::{PresenceState, PresenceStateMachine, Transition};
use crate::surface::{AudioCapture, PresenceSurface};
use crate::tap::AmplitudeTap;

/// What a single `tick` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// No surface attached; nothing advanced.
    Detached,
    /// Simulation advanced but the surface had no area, so nothing was painted.
    Simulated,
    Painted,
    /// Simulation advanced; the surface rejected the frame.
    PaintFailed,
}

/// Read-only view of the engine for overlays and diagnostics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineSnapshot {
    pub time: f64,
    pub frame: u64,
    pub state: PresenceState,
    pub hesitation: f32,
    pub envelope: EnvelopeState,
    pub energy: f32,
    pub onset: f32,
    pub emotion: EmotionVector,
    pub mean_radius: f32,
    pub viewport: Viewport,
    pub stats: FrameStats,
}

struct Session<S> {
    surface: S,
    audio: Option<Box<dyn AudioCapture>>,
}

pub struct PresenceEngine<S: PresenceSurface> {
    cfg: PresenceConfig,
    time: f64,
    frame: u64,
    envelope: EnvelopeTracker,
    states: PresenceStateMachine,
    field: ParticleField,
    emotion: EmotionVector,
    tap: AmplitudeTap,
    viewport: Viewport,
    last_size: Option<SurfaceSize>,
    session: Option<Session<S>>,
    halo: Vec<Dot>,
    core: Vec<Dot>,
    budget: FrameBudget,
}

impl<S: PresenceSurface> PresenceEngine<S> {
    pub fn new(cfg: PresenceConfig) -> Result<Self, PresenceError> {
        cfg.validate()?;
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let n = cfg.swarm.particle_count;
        Ok(Self {
            envelope: EnvelopeTracker::new(cfg.envelope.clone()),
            states: PresenceStateMachine::new(cfg.mode, cfg.hesitation_ramp_sec),
            field: ParticleField::new(cfg.swarm.clone(), rng),
            budget: FrameBudget::new(cfg.refresh_rate_hz),
            time: 0.0,
            frame: 0,
            emotion: EmotionVector::NEUTRAL,
            tap: AmplitudeTap::new(),
            viewport: Viewport::default(),
            last_size: None,
            session: None,
            halo: Vec::with_capacity(n),
            core: Vec::with_capacity(n),
            cfg,
        })
    }

    /// Bind to a surface (and optionally an audio capture) and start a fresh
    /// session.
    ///
    /// On failure nothing stays acquired: the surface is dropped and a
    /// capture that failed to start is not kept.
    pub fn attach(
        &mut self,
        surface: S,
        audio: Option<Box<dyn AudioCapture>>,
    ) -> Result<(), PresenceError> {
        if self.session.is_some() {
            return Err(PresenceError::AlreadyAttached);
        }
        let size = surface.size();
        if size.is_empty() {
            return Err(PresenceError::SurfaceUnavailable(format!(
                "surface has no drawable area ({}x{})",
                size.width, size.height
            )));
        }
        self.reset_session();
        let mut audio = audio;
        if let Some(capture) = audio.as_mut() {
            capture.start(self.tap.clone())?;
        }
        if self.last_size.is_some() && self.last_size != Some(size) {
            // surface was recreated at a different size
            self.field.reinitialize();
        }
        self.apply_size(size);
        log::info!(
            "[presence] attached {}x{} @{:.2}x, {} particles, mode={:?}, audio={}",
            size.width,
            size.height,
            size.pixel_ratio,
            self.field.len(),
            self.cfg.mode,
            audio.is_some()
        );
        self.session = Some(Session { surface, audio });
        Ok(())
    }

    /// Stop ticking, release audio capture and hand the surface back.
    pub fn detach(&mut self) -> Option<S> {
        let Session { surface, audio } = self.session.take()?;
        if let Some(mut capture) = audio {
            capture.stop();
        }
        self.reset_session();
        log::info!("[presence] detached after {} frames", self.frame);
        Some(surface)
    }

    pub fn is_attached(&self) -> bool {
        self.session.is_some()
    }

    /// Zero the envelope, return to idle and drop any pending amplitude.
    pub fn reset_session(&mut self) {
        self.envelope.reset();
        self.states.reset();
        self.tap.clear();
        log::debug!("[presence] session reset at t={:.3}", self.time);
    }

    /// Overwrite the latest emotion estimate. Fields are clamped to [0, 1].
    pub fn set_emotion(&mut self, valence: f32, arousal: f32, dominance: f32) {
        self.emotion = EmotionVector::new(valence, arousal, dominance);
    }

    pub fn set_emotion_vector(&mut self, emotion: EmotionVector) {
        self.emotion = emotion;
    }

    pub fn emotion(&self) -> EmotionVector {
        self.emotion
    }

    pub fn set_state(&mut self, next: PresenceState) -> Transition {
        let t = self.states.set_state(next, self.time);
        match t {
            Transition::TalkStarted { from } => {
                self.envelope.reset();
                log::debug!("[state] {} -> talking at t={:.3}", from.as_str(), self.time);
            }
            Transition::Changed { from, to } => {
                log::debug!("[state] {} -> {}", from.as_str(), to.as_str());
            }
            Transition::Rejected { requested } => {
                log::warn!(
                    "[state] ignoring {} after one-shot session finished",
                    requested.as_str()
                );
            }
            Transition::Unchanged => {}
        }
        t
    }

    pub fn state(&self) -> PresenceState {
        self.states.state()
    }

    /// Store the newest RMS amplitude; only the latest value is kept.
    pub fn push_amplitude_sample(&self, rms: f32) {
        self.tap.push(rms);
    }

    /// Handle for producers living on other threads.
    pub fn amplitude_tap(&self) -> AmplitudeTap {
        self.tap.clone()
    }

    pub fn hesitation(&self) -> f32 {
        self.states.hesitation(self.time)
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn envelope(&self) -> &EnvelopeTracker {
        &self.envelope
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn config(&self) -> &PresenceConfig {
        &self.cfg
    }

    pub fn surface(&self) -> Option<&S> {
        self.session.as_ref().map(|s| &s.surface)
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.session.as_mut().map(|s| &mut s.surface)
    }

    /// Advance one frame and paint it.
    pub fn tick(&mut self) -> TickOutcome {
        let started = Instant::now();
        let size = match self.session.as_mut() {
            Some(session) => {
                if let Some(capture) = session.audio.as_mut() {
                    capture.poll();
                }
                session.surface.size()
            }
            None => return TickOutcome::Detached,
        };

        let amplitude = if self.states.is_talking() {
            self.tap.take()
        } else {
            self.tap.clear();
            None
        };
        self.envelope.update(amplitude);
        let hesitation = self.states.hesitation(self.time);

        let drawable = !size.is_empty();
        if drawable && self.last_size != Some(size) {
            self.apply_size(size);
        }

        let time = self.time as f32;
        let energy = self.envelope.energy();
        let onset = self.envelope.onset();
        self.field.advance(
            &FieldInput {
                time,
                energy,
                onset,
                emotion: self.emotion,
                talking: self.states.is_talking(),
                hesitation,
            },
            &self.viewport,
        );

        let outcome = if drawable {
            fill_dot_passes(
                self.field.sprites(),
                &self.viewport,
                onset,
                &mut self.halo,
                &mut self.core,
            );
            let scene = Scene {
                size,
                background: Background::derive(size, &self.viewport, self.emotion, energy, time),
                halo: &self.halo,
                core: &self.core,
                blend: BlendMode::Additive,
            };
            match self.session.as_mut().map(|s| s.surface.present(&scene)) {
                Some(Ok(())) => TickOutcome::Painted,
                Some(Err(e)) => {
                    log::warn!("[presence] present failed: {e}");
                    TickOutcome::PaintFailed
                }
                None => TickOutcome::Detached,
            }
        } else {
            TickOutcome::Simulated
        };

        self.time += self.cfg.frame_step_sec();
        self.frame += 1;
        self.budget.record(started.elapsed());
        outcome
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            time: self.time,
            frame: self.frame,
            state: self.states.state(),
            hesitation: self.states.hesitation(self.time),
            envelope: self.envelope.state(),
            energy: self.envelope.energy(),
            onset: self.envelope.onset(),
            emotion: self.emotion,
            mean_radius: self.field.mean_radius(),
            viewport: self.viewport,
            stats: self.budget.stats(),
        }
    }

    fn apply_size(&mut self, size: SurfaceSize) {
        self.viewport = size.viewport(self.cfg.base_radius_fraction);
        if let Some(prev) = self.last_size {
            log::debug!(
                "[presence] resize {}x{} -> {}x{} @{:.2}x",
                prev.width,
                prev.height,
                size.width,
                size.height,
                size.pixel_ratio
            );
        }
        self.last_size = Some(size);
    }
}

impl<S: PresenceSurface> Drop for PresenceEngine<S> {
    fn drop(&mut self) {
        if let Some(session) = self.session.as_mut() {
            if let Some(capture) = session.audio.as_mut() {
                capture.stop();
            }
        }
    }
}
