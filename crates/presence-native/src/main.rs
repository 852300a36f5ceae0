mod capture;
mod gpu;

use presence_core::{
    AudioCapture, EmotionAxis, PresenceConfig, PresenceEngine, PresenceError, PresenceState,
    TickOutcome,
};
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use capture::CpalCapture;
use gpu::GpuSurface;

const NUDGE: f32 = 0.05;
const TITLE_EVERY_FRAMES: u64 = 30;

fn key_state(key: &str) -> Option<PresenceState> {
    match key {
        "1" => Some(PresenceState::Idle),
        "2" => Some(PresenceState::Listening),
        "3" => Some(PresenceState::Talking),
        "4" => Some(PresenceState::Done),
        _ => None,
    }
}

fn key_nudge(key: &str) -> Option<(EmotionAxis, f32)> {
    match key {
        "q" => Some((EmotionAxis::Valence, NUDGE)),
        "a" => Some((EmotionAxis::Valence, -NUDGE)),
        "w" => Some((EmotionAxis::Arousal, NUDGE)),
        "s" => Some((EmotionAxis::Arousal, -NUDGE)),
        "e" => Some((EmotionAxis::Dominance, NUDGE)),
        "d" => Some((EmotionAxis::Dominance, -NUDGE)),
        _ => None,
    }
}

fn handle_key<S: presence_core::PresenceSurface>(engine: &mut PresenceEngine<S>, key: &str) {
    let key = key.to_ascii_lowercase();
    if let Some(state) = key_state(&key) {
        engine.set_state(state);
    } else if let Some((axis, delta)) = key_nudge(&key) {
        let e = engine.emotion().nudged(axis, delta);
        engine.set_emotion_vector(e);
        log::info!(
            "[input] emotion v={:.2} a={:.2} d={:.2}",
            e.valence(),
            e.arousal(),
            e.dominance()
        );
    } else if key == "r" {
        engine.reset_session();
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cfg = if args.iter().any(|a| a == "--intro") {
        PresenceConfig::intro()
    } else {
        PresenceConfig::ambient()
    };
    let use_mic = !args.iter().any(|a| a == "--no-mic");
    let particles = cfg.swarm.particle_count;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("presence")
        .build(&event_loop)?;

    let mut engine: PresenceEngine<GpuSurface> = PresenceEngine::new(cfg)?;
    let surface = pollster::block_on(GpuSurface::new(&window, particles * 2))?;
    let audio: Option<Box<dyn AudioCapture>> = if use_mic {
        Some(Box::new(CpalCapture::new()))
    } else {
        None
    };
    match engine.attach(surface, audio) {
        Ok(()) => {}
        Err(PresenceError::AudioSetup(reason)) => {
            // the failed attach dropped the surface, so build a fresh one
            log::warn!("[audio] microphone unavailable ({reason}); running silent");
            let surface = pollster::block_on(GpuSurface::new(&window, particles * 2))?;
            engine.attach(surface, None)?;
        }
        Err(e) => return Err(e.into()),
    }
    log::info!("[input] 1-4 state, q/a w/s e/d emotion, r reset, esc quit");

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => {
            if let Some(surface) = engine.surface_mut() {
                surface.resize(size);
            }
        }
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => {
            engine.detach();
            elwt.exit();
        }
        Event::WindowEvent {
            event:
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key,
                            state: ElementState::Pressed,
                            repeat: false,
                            ..
                        },
                    ..
                },
            ..
        } => match logical_key {
            Key::Named(NamedKey::Escape) => {
                engine.detach();
                elwt.exit();
            }
            Key::Character(c) => handle_key(&mut engine, c.as_str()),
            _ => {}
        },
        Event::AboutToWait => {
            if engine.tick() == TickOutcome::PaintFailed {
                log::debug!("[frame] skipped");
            }
            let snap = engine.snapshot();
            if let Some(surface) = engine.surface() {
                if snap.frame % TITLE_EVERY_FRAMES == 0 {
                    surface.window().set_title(&format!(
                        "presence | {} | energy {:.2} onset {:.2} | r {:.2}",
                        snap.state.as_str(),
                        snap.energy,
                        snap.onset,
                        snap.mean_radius
                    ));
                }
                surface.window().request_redraw();
            }
        }
        _ => {}
    })?;
    Ok(())
}
