// Behavior-controller tests (native) for the `pixel-raven` crate.
// These exercise the pure simulation API without any browser machinery, so
// they run under plain `cargo test` on the host.

use pixel_raven::raven::frames;
use pixel_raven::{PetConfig, PetState, Raven, RestPolicy, Vec2};

fn spawn_raven() -> Raven {
    Raven::new(PetConfig::default(), Vec2::new(0.0, 0.0), 42)
}

#[test]
fn resting_when_target_equals_position() {
    let mut raven = spawn_raven();
    raven.step();
    assert_eq!(raven.state(), PetState::Idle);
    assert_eq!(raven.position(), Vec2::new(0.0, 0.0));
}

#[test]
fn one_past_the_far_threshold_takes_wing() {
    let mut raven = spawn_raven();
    raven.pointer_moved(0.0, 1001.0);
    raven.step();
    assert_eq!(raven.state(), PetState::Flying);
}

#[test]
fn between_the_thresholds_walks() {
    for distance in [21.0, 400.0, 1000.0] {
        let mut raven = spawn_raven();
        raven.pointer_moved(distance, 0.0);
        raven.step();
        assert_eq!(raven.state(), PetState::Walking, "at distance {distance}");
    }
}

#[test]
fn walking_moves_one_step_size_per_axis() {
    let mut raven = spawn_raven();
    raven.pointer_moved(100.0, 0.0);
    raven.step();
    assert_eq!(raven.position(), Vec2::new(2.0, 0.0));
}

#[test]
fn flight_covers_three_steps_per_axis() {
    let mut raven = spawn_raven();
    raven.pointer_moved(2000.0, -2000.0);
    raven.step();
    assert_eq!(raven.position(), Vec2::new(6.0, -6.0));
}

#[test]
fn chase_converges_into_the_resting_band() {
    let mut raven = spawn_raven();
    raven.pointer_moved(300.0, 120.0);
    for tick in 0..400 {
        if tick % 2 == 0 {
            raven.advance_tick();
        }
        raven.step();
    }
    let resting = raven.position().distance_to(raven.target());
    assert!(resting <= 20.0, "still {resting}px away after the chase");
    assert_eq!(raven.state(), PetState::Idle);
}

#[test]
fn deterministic_walk_cycle_over_ticks() {
    // frame_count = 4 for the walk sheet: ticks 0..=4 produce 0,1,2,3,0
    let frames: Vec<u32> = (0u64..5).map(|t| frames::cycle(t, 4)).collect();
    assert_eq!(frames, vec![0, 1, 2, 3, 0]);
}

#[test]
fn dead_raven_ignores_the_pointer() {
    let mut raven = spawn_raven();
    raven.pointer_moved(10.0, 10.0);
    raven.die();
    raven.pointer_moved(500.0, 500.0);
    assert_eq!(raven.target(), Vec2::new(10.0, 10.0));
}

#[test]
fn dead_raven_never_steps_again() {
    let mut raven = spawn_raven();
    raven.pointer_moved(300.0, 0.0);
    raven.step();
    let frozen = raven.position();
    raven.die();
    for _ in 0..50 {
        raven.advance_tick();
        assert_eq!(raven.step(), None);
    }
    assert_eq!(raven.position(), frozen);
    assert_eq!(raven.state(), PetState::Dead);
}

#[test]
fn repeated_death_is_a_no_op() {
    let mut raven = spawn_raven();
    assert!(raven.die());
    let first = raven.advance_death();
    assert!(!raven.die());
    assert!(!raven.die());
    let second = raven.advance_death();
    // the sweep continued from frame 1; it was not restarted
    assert_ne!(first, second);
}

#[test]
fn death_sweep_visits_all_frames_then_stops_for_good() {
    let mut raven = spawn_raven();
    raven.die();
    let mut count = 0;
    while raven.advance_death().is_some() {
        count += 1;
    }
    assert_eq!(count, 11);
    // the 12th and every later advance produce no further change
    assert_eq!(raven.advance_death(), None);
    assert_eq!(raven.advance_death(), None);
}

#[test]
fn every_reachable_state_keeps_frames_in_bounds() {
    let mut raven = spawn_raven();
    let waypoints = [
        (2500.0, 0.0),
        (0.0, 0.0),
        (60.0, 60.0),
        (-3000.0, 1200.0),
        (5.0, -5.0),
    ];
    for (step, (x, y)) in waypoints.iter().cycle().take(500).enumerate() {
        raven.pointer_moved(*x, *y);
        if step % 2 == 0 {
            raven.advance_tick();
        }
        raven.step();
        assert!(raven.current_frame() < raven.state().sheet().frame_count);
    }
}

#[test]
fn stand_policy_never_blinks() {
    let config = PetConfig {
        rest: RestPolicy::Stand,
        ..PetConfig::default()
    };
    let mut raven = Raven::new(config, Vec2::new(0.0, 0.0), 1);
    for _ in 0..200 {
        raven.step();
        assert_eq!(raven.state(), PetState::Staying);
        assert_eq!(raven.current_frame(), 0);
    }
}

#[test]
fn blink_policy_eventually_blinks() {
    let mut raven = spawn_raven();
    let mut advanced = false;
    for _ in 0..20_000 {
        raven.step();
        if raven.current_frame() != 0 {
            advanced = true;
            break;
        }
    }
    assert!(advanced, "idle automaton never left frame 0");
}
