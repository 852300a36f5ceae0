// Host-side tests for the presence state machine and hesitation ramp.

use presence_core::config::SessionMode;
use presence_core::{PresenceState, PresenceStateMachine, Transition};

const RAMP: f64 = 0.26;

#[test]
fn hesitation_ramps_from_zero_to_one_over_260ms() {
    let mut sm = PresenceStateMachine::new(SessionMode::Looping, RAMP);
    let t0 = 1.5;
    assert_eq!(
        sm.set_state(PresenceState::Talking, t0),
        Transition::TalkStarted {
            from: PresenceState::Idle
        }
    );
    assert_eq!(sm.hesitation(t0), 0.0);

    let mut prev = 0.0;
    for i in 1..=26 {
        let h = sm.hesitation(t0 + i as f64 * 0.01);
        assert!(h >= prev, "hesitation not monotonic at step {i}: {prev} -> {h}");
        prev = h;
    }
    assert!(sm.hesitation(t0 + RAMP) >= 1.0 - 1e-6);
    assert_eq!(sm.hesitation(t0 + 0.3), 1.0);
    assert_eq!(sm.hesitation(t0 + 10.0), 1.0);
}

#[test]
fn hesitation_is_zero_outside_talking() {
    let mut sm = PresenceStateMachine::new(SessionMode::Looping, RAMP);
    assert_eq!(sm.hesitation(5.0), 0.0);
    sm.set_state(PresenceState::Talking, 0.0);
    sm.set_state(PresenceState::Listening, 1.0);
    assert_eq!(sm.hesitation(1.0), 0.0);
}

#[test]
fn talk_start_recorded_only_on_entry() {
    let mut sm = PresenceStateMachine::new(SessionMode::Looping, RAMP);
    sm.set_state(PresenceState::Listening, 0.5);
    assert_eq!(sm.talk_started_at(), None);
    sm.set_state(PresenceState::Talking, 1.0);
    assert_eq!(sm.set_state(PresenceState::Talking, 2.0), Transition::Unchanged);
    assert_eq!(sm.talk_started_at(), Some(1.0));
    sm.set_state(PresenceState::Idle, 3.0);
    sm.set_state(PresenceState::Talking, 4.0);
    assert_eq!(sm.talk_started_at(), Some(4.0));
}

#[test]
fn one_shot_done_is_terminal_until_reset() {
    let mut sm = PresenceStateMachine::new(SessionMode::OneShot, RAMP);
    sm.set_state(PresenceState::Talking, 0.0);
    assert_eq!(
        sm.set_state(PresenceState::Done, 3.0),
        Transition::Changed {
            from: PresenceState::Talking,
            to: PresenceState::Done
        }
    );
    assert_eq!(
        sm.set_state(PresenceState::Talking, 4.0),
        Transition::Rejected {
            requested: PresenceState::Talking
        }
    );
    assert_eq!(sm.state(), PresenceState::Done);
    assert_eq!(sm.set_state(PresenceState::Done, 4.0), Transition::Unchanged);

    sm.reset();
    assert_eq!(sm.state(), PresenceState::Idle);
    assert_eq!(sm.talk_started_at(), None);
    assert!(matches!(
        sm.set_state(PresenceState::Talking, 5.0),
        Transition::TalkStarted { .. }
    ));
}

#[test]
fn looping_session_settles_done_into_idle() {
    let mut sm = PresenceStateMachine::new(SessionMode::Looping, RAMP);
    sm.set_state(PresenceState::Talking, 0.0);
    sm.set_state(PresenceState::Done, 1.0);
    assert_eq!(sm.state(), PresenceState::Idle);
    assert!(matches!(
        sm.set_state(PresenceState::Talking, 2.0),
        Transition::TalkStarted { .. }
    ));
}

#[test]
fn state_names_round_trip_through_parse() {
    for s in [
        PresenceState::Idle,
        PresenceState::Listening,
        PresenceState::Talking,
        PresenceState::Done,
    ] {
        assert_eq!(PresenceState::parse(s.as_str()), Some(s));
    }
    assert_eq!(PresenceState::parse(" Talking "), Some(PresenceState::Talking));
    assert_eq!(PresenceState::parse("speaking"), None);
}
