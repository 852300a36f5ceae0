// Host-side tests for the render loop: attach/detach lifecycle, input
// ingestion, envelope gating and the scene handed to the surface.

mod common;

use common::*;
use presence_core::{
    BlendMode, PresenceConfig, PresenceEngine, PresenceError, PresenceState, SurfaceSize,
    TickOutcome, Transition,
};

#[test]
fn emotion_is_clamped_on_ingestion() {
    let mut engine = attached_engine(seeded(16));
    for v in [-5.0_f32, 5.0, 0.25, 1.0, 0.0] {
        engine.set_emotion(v, v, v);
        let e = engine.emotion();
        for f in [e.valence(), e.arousal(), e.dominance()] {
            assert!((0.0..=1.0).contains(&f), "field {f} from input {v}");
        }
    }
    engine.set_emotion(-5.0, 5.0, f32::NAN);
    let e = engine.emotion();
    assert_eq!((e.valence(), e.arousal(), e.dominance()), (0.0, 1.0, 0.5));
}

#[test]
fn tick_without_surface_does_nothing() {
    let mut engine: PresenceEngine<RecordingSurface> =
        PresenceEngine::new(seeded(8)).expect("config");
    assert_eq!(engine.tick(), TickOutcome::Detached);
    assert_eq!(engine.time(), 0.0);
}

#[test]
fn attach_rejects_empty_surface_and_double_attach() {
    let mut engine: PresenceEngine<RecordingSurface> =
        PresenceEngine::new(seeded(8)).expect("config");
    let err = engine
        .attach(RecordingSurface::new(0, 300), None)
        .unwrap_err();
    assert!(matches!(err, PresenceError::SurfaceUnavailable(_)));
    assert!(!engine.is_attached());

    engine
        .attach(RecordingSurface::new(200, 100), None)
        .expect("attach");
    let err = engine
        .attach(RecordingSurface::new(200, 100), None)
        .unwrap_err();
    assert!(matches!(err, PresenceError::AlreadyAttached));
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = PresenceConfig::default().with_particle_count(0);
    let res: Result<PresenceEngine<RecordingSurface>, _> = PresenceEngine::new(cfg);
    assert!(matches!(res, Err(PresenceError::Config(_))));
}

#[test]
fn failed_audio_start_leaves_engine_detached() {
    let mut engine: PresenceEngine<RecordingSurface> =
        PresenceEngine::new(seeded(8)).expect("config");
    let mut capture = ScriptedCapture::new(0.5);
    capture.fail_start = true;
    let err = engine
        .attach(RecordingSurface::new(320, 240), Some(Box::new(capture)))
        .unwrap_err();
    assert!(matches!(err, PresenceError::AudioSetup(_)));
    assert!(!engine.is_attached());
    assert_eq!(engine.tick(), TickOutcome::Detached);
}

#[test]
fn detach_stops_capture_and_returns_surface() {
    let mut engine: PresenceEngine<RecordingSurface> =
        PresenceEngine::new(seeded(8)).expect("config");
    let capture = ScriptedCapture::new(0.5);
    let (started, stopped, polls) = (
        capture.started.clone(),
        capture.stopped.clone(),
        capture.polls.clone(),
    );
    engine
        .attach(RecordingSurface::new(320, 240), Some(Box::new(capture)))
        .expect("attach");
    assert!(started.get());
    for _ in 0..5 {
        assert_eq!(engine.tick(), TickOutcome::Painted);
    }
    assert_eq!(polls.get(), 5);

    let surface = engine.detach().expect("was attached");
    assert!(stopped.get());
    assert_eq!(surface.presented, 5);
    assert!(!engine.is_attached());
    assert_eq!(engine.tick(), TickOutcome::Detached);
    assert_eq!(engine.state(), PresenceState::Idle);
    assert!(engine.detach().is_none());
}

#[test]
fn dropping_attached_engine_stops_capture() {
    let capture = ScriptedCapture::new(0.1);
    let stopped = capture.stopped.clone();
    {
        let mut engine: PresenceEngine<RecordingSurface> =
            PresenceEngine::new(seeded(8)).expect("config");
        engine
            .attach(RecordingSurface::new(64, 64), Some(Box::new(capture)))
            .expect("attach");
        engine.tick();
    }
    assert!(stopped.get());
}

#[test]
fn amplitude_only_feeds_envelope_while_talking() {
    let mut engine = attached_engine(seeded(16));
    engine.set_state(PresenceState::Listening);
    for _ in 0..30 {
        engine.push_amplitude_sample(0.9);
        engine.tick();
    }
    assert_eq!(engine.snapshot().energy, 0.0);

    engine.set_state(PresenceState::Talking);
    for _ in 0..30 {
        engine.push_amplitude_sample(0.9);
        engine.tick();
    }
    assert!(engine.snapshot().energy > 0.5);
}

#[test]
fn missing_samples_decay_the_envelope() {
    let mut engine = attached_engine(seeded(16));
    engine.set_state(PresenceState::Talking);
    for _ in 0..40 {
        engine.push_amplitude_sample(0.7);
        engine.tick();
    }
    let loud = engine.snapshot().envelope;
    // no pushes: each tick sees silence
    engine.tick();
    let after = engine.snapshot().envelope;
    assert!(after.fast < loud.fast);
    assert!(after.smooth < loud.smooth);
}

#[test]
fn entering_talking_resets_envelope_before_next_sample() {
    let mut engine = attached_engine(seeded(16));
    engine.set_state(PresenceState::Talking);
    for _ in 0..20 {
        engine.push_amplitude_sample(0.5);
        engine.tick();
    }
    assert!(engine.snapshot().envelope.smooth > 0.0);

    // re-requesting talking while already talking keeps the envelope
    assert_eq!(engine.set_state(PresenceState::Talking), Transition::Unchanged);
    assert!(engine.snapshot().envelope.smooth > 0.0);

    engine.set_state(PresenceState::Idle);
    engine.push_amplitude_sample(0.5);
    assert!(matches!(
        engine.set_state(PresenceState::Talking),
        Transition::TalkStarted { .. }
    ));
    let env = engine.snapshot().envelope;
    assert_eq!((env.fast, env.slow, env.smooth), (0.0, 0.0, 0.0));
}

#[test]
fn hesitation_reaches_one_after_ramp_on_fixed_clock() {
    let mut engine = attached_engine(seeded(16));
    for _ in 0..10 {
        engine.tick();
    }
    engine.set_state(PresenceState::Talking);
    assert_eq!(engine.hesitation(), 0.0);
    let mut prev = 0.0;
    // 16 frames at 60 Hz cover the 260 ms ramp
    for _ in 0..16 {
        engine.tick();
        let h = engine.hesitation();
        assert!(h >= prev);
        prev = h;
    }
    assert_eq!(engine.hesitation(), 1.0);
}

#[test]
fn loud_burst_through_engine_spikes_onset() {
    let mut engine = attached_engine(seeded(32));
    engine.set_state(PresenceState::Talking);
    let mut peak = 0.0_f32;
    for _ in 0..10 {
        engine.push_amplitude_sample(0.8);
        engine.tick();
        peak = peak.max(engine.snapshot().onset);
    }
    assert!(peak > 0.5, "onset peak {peak}");
    for _ in 0..10 {
        engine.push_amplitude_sample(0.0);
        engine.tick();
    }
    assert!(engine.snapshot().onset < 0.05);
}

#[test]
fn silent_idle_engine_settles_to_resting_ring() {
    let mut engine = attached_engine(seeded(128));
    for _ in 0..8000 {
        engine.push_amplitude_sample(0.0);
        engine.tick();
    }
    let snap = engine.snapshot();
    assert_eq!(snap.state, PresenceState::Idle);
    assert!(snap.energy.abs() < 1e-6);
    assert!(snap.onset.abs() < 1e-6);
    assert!(
        (snap.mean_radius - 0.92).abs() < 0.02,
        "mean radius {}",
        snap.mean_radius
    );
}

#[test]
fn scene_has_halo_and_core_passes() {
    let mut engine = attached_engine(seeded(24));
    assert_eq!(engine.tick(), TickOutcome::Painted);
    let surface = engine.surface().expect("attached");
    let frame = surface.last.as_ref().expect("presented");
    assert_eq!(frame.blend, BlendMode::Additive);
    assert_eq!(frame.halo.len(), 24);
    assert_eq!(frame.core.len(), 24);
    for (h, c) in frame.halo.iter().zip(&frame.core) {
        assert_eq!(h.center, c.center);
        assert!(h.radius > c.radius);
        assert!(h.color[3] < c.color[3]);
    }
    let stops = frame.background.stops;
    assert_eq!(stops[0].offset, 0.0);
    assert_eq!(stops[2].offset, 1.0);
    assert_eq!(frame.background.center.to_array(), [400.0, 300.0]);
}

#[test]
fn resize_recomputes_geometry_and_zero_size_reuses_it() {
    let mut engine = attached_engine(seeded(16));
    engine.tick();
    let before = engine.snapshot().viewport;
    assert!((before.base_radius_px - 600.0 * 0.22).abs() < 1e-3);

    engine.surface_mut().expect("attached").size = SurfaceSize::new(1000, 2000, 2.0);
    assert_eq!(engine.tick(), TickOutcome::Painted);
    let after = engine.snapshot().viewport;
    assert_eq!(after.center.to_array(), [500.0, 1000.0]);
    assert!((after.base_radius_px - 1000.0 * 0.22).abs() < 1e-3);
    assert_eq!(after.pixel_ratio, 2.0);

    engine.surface_mut().expect("attached").size = SurfaceSize::new(0, 0, 2.0);
    let frame_before = engine.snapshot().frame;
    assert_eq!(engine.tick(), TickOutcome::Simulated);
    assert_eq!(engine.snapshot().viewport, after);
    assert_eq!(engine.snapshot().frame, frame_before + 1);
}

#[test]
fn failed_present_keeps_the_loop_running() {
    let mut engine = attached_engine(seeded(16));
    engine.surface_mut().expect("attached").fail = true;
    assert_eq!(engine.tick(), TickOutcome::PaintFailed);
    engine.surface_mut().expect("attached").fail = false;
    assert_eq!(engine.tick(), TickOutcome::Painted);
    assert_eq!(engine.snapshot().frame, 2);
}

#[test]
fn one_shot_engine_ends_in_done() {
    let cfg = PresenceConfig::intro().with_seed(3).with_particle_count(16);
    let mut engine = attached_engine(cfg);
    engine.set_state(PresenceState::Talking);
    engine.tick();
    engine.set_state(PresenceState::Done);
    assert!(matches!(
        engine.set_state(PresenceState::Listening),
        Transition::Rejected { .. }
    ));
    assert_eq!(engine.state(), PresenceState::Done);
    engine.reset_session();
    assert_eq!(engine.state(), PresenceState::Idle);
}

#[test]
fn frame_stats_count_every_tick() {
    let mut engine = attached_engine(seeded(16));
    for _ in 0..12 {
        engine.tick();
    }
    let stats = engine.snapshot().stats;
    assert_eq!(stats.frames, 12);
    assert!(stats.worst_tick >= stats.last_tick);
}
