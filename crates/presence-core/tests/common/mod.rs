// Test doubles shared by the engine-level tests.

#![allow(dead_code)]
use std::cell::Cell;
use std::rc::Rc;

use presence_core::{
    AmplitudeTap, AudioCapture, Background, BlendMode, Dot, PresenceConfig, PresenceEngine,
    PresenceError, PresenceSurface, Scene, SurfaceSize,
};

#[derive(Clone, Debug)]
pub struct RecordedFrame {
    pub size: SurfaceSize,
    pub background: Background,
    pub halo: Vec<Dot>,
    pub core: Vec<Dot>,
    pub blend: BlendMode,
}

/// Surface that keeps the most recent scene and counts presents.
pub struct RecordingSurface {
    pub size: SurfaceSize,
    pub presented: usize,
    pub last: Option<RecordedFrame>,
    pub fail: bool,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: SurfaceSize::new(width, height, 1.0),
            presented: 0,
            last: None,
            fail: false,
        }
    }
}

impl PresenceSurface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn present(&mut self, scene: &Scene<'_>) -> Result<(), PresenceError> {
        if self.fail {
            return Err(PresenceError::Surface("device lost".into()));
        }
        self.presented += 1;
        self.last = Some(RecordedFrame {
            size: scene.size,
            background: scene.background,
            halo: scene.halo.to_vec(),
            core: scene.core.to_vec(),
            blend: scene.blend,
        });
        Ok(())
    }
}

/// Capture that pushes a fixed RMS value on every poll.
pub struct ScriptedCapture {
    pub level: f32,
    pub fail_start: bool,
    pub started: Rc<Cell<bool>>,
    pub stopped: Rc<Cell<bool>>,
    pub polls: Rc<Cell<u32>>,
    tap: Option<AmplitudeTap>,
}

impl ScriptedCapture {
    pub fn new(level: f32) -> Self {
        Self {
            level,
            fail_start: false,
            started: Rc::new(Cell::new(false)),
            stopped: Rc::new(Cell::new(false)),
            polls: Rc::new(Cell::new(0)),
            tap: None,
        }
    }
}

impl AudioCapture for ScriptedCapture {
    fn start(&mut self, tap: AmplitudeTap) -> Result<(), PresenceError> {
        if self.fail_start {
            return Err(PresenceError::AudioSetup("no input device".into()));
        }
        self.started.set(true);
        self.tap = Some(tap);
        Ok(())
    }

    fn poll(&mut self) {
        self.polls.set(self.polls.get() + 1);
        if let Some(tap) = &self.tap {
            tap.push(self.level);
        }
    }

    fn stop(&mut self) {
        self.stopped.set(true);
        self.tap = None;
    }
}

pub fn seeded(count: usize) -> PresenceConfig {
    PresenceConfig::ambient()
        .with_seed(7)
        .with_particle_count(count)
}

pub fn attached_engine(cfg: PresenceConfig) -> PresenceEngine<RecordingSurface> {
    let mut engine = PresenceEngine::new(cfg).expect("valid config");
    engine
        .attach(RecordingSurface::new(800, 600), None)
        .expect("attach");
    engine
}
