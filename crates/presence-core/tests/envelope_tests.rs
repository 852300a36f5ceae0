// Host-side tests for envelope extraction.

use presence_core::config::EnvelopeConfig;
use presence_core::EnvelopeTracker;

fn tracker() -> EnvelopeTracker {
    EnvelopeTracker::new(EnvelopeConfig::default())
}

#[test]
fn constant_input_converges_monotonically() {
    let a = 0.6_f32;
    let k = EnvelopeConfig::default().smooth_rate;
    // ticks needed for a * (1 - k)^n < 0.01
    let bound = ((0.01 / a).ln() / (1.0 - k).ln()).ceil() as usize + 1;
    let mut env = tracker();
    let mut prev = env.energy();
    for _ in 0..bound {
        env.update(Some(a));
        let e = env.energy();
        assert!(e >= prev, "smooth decreased: {prev} -> {e}");
        assert!(e <= a + 1e-6, "smooth overshot: {e}");
        prev = e;
    }
    assert!(
        (env.energy() - a).abs() < 0.01,
        "not converged after {bound} ticks: {}",
        env.energy()
    );
}

#[test]
fn fast_leads_slow_on_a_rising_edge() {
    let mut env = tracker();
    env.update(Some(0.5));
    let s = env.state();
    assert!(s.fast > s.slow && s.slow > s.smooth);
    assert!((s.fast - 0.5 * 0.35).abs() < 1e-6);
}

#[test]
fn loud_burst_spikes_onset_then_decays() {
    let mut env = tracker();
    let mut peak = 0.0_f32;
    for _ in 0..10 {
        env.update(Some(0.8));
        peak = peak.max(env.onset());
    }
    assert!(peak > 0.5, "onset peak too small: {peak}");

    let mut settled_at = None;
    for n in 0..30 {
        env.update(Some(0.0));
        if env.onset() < 0.05 {
            settled_at = Some(n);
            break;
        }
    }
    let n = settled_at.expect("onset never decayed");
    assert!(n < 10, "onset took {n} ticks to decay");
}

#[test]
fn missing_samples_count_as_silence() {
    let mut a = tracker();
    let mut b = tracker();
    for _ in 0..20 {
        a.update(Some(0.4));
        b.update(Some(0.4));
    }
    a.update(None);
    b.update(Some(0.0));
    assert_eq!(a.state(), b.state());
}

#[test]
fn non_finite_amplitude_is_treated_as_zero() {
    let mut env = tracker();
    env.update(Some(f32::NAN));
    env.update(Some(f32::INFINITY));
    env.update(Some(-2.0));
    let s = env.state();
    assert_eq!((s.fast, s.slow, s.smooth), (0.0, 0.0, 0.0));
    assert_eq!(env.onset(), 0.0);
}

#[test]
fn onset_is_clamped_to_unit_range() {
    let mut env = tracker();
    env.update(Some(50.0));
    assert_eq!(env.onset(), 1.0);
    for _ in 0..200 {
        env.update(Some(0.0));
        let o = env.onset();
        assert!((0.0..=1.0).contains(&o));
    }
}

#[test]
fn reset_zeroes_every_accumulator() {
    let mut env = tracker();
    for _ in 0..15 {
        env.update(Some(0.9));
    }
    env.reset();
    let s = env.state();
    assert_eq!((s.fast, s.slow, s.smooth), (0.0, 0.0, 0.0));
}
