//! Tests for the simplified stall dynamics backend

use physics::{
    constants::DEFAULT_DT, AircraftState, ControlInput, DynamicsBackend, DynamicsCoefficients,
    SimplifiedDynamics, StateLimits,
};

const EPS: f32 = 1e-4;

fn near_stall() -> AircraftState {
    AircraftState {
        alpha: 15.0,
        speed: 50.0,
        pitch_rate: 0.0,
        pitch_angle: 15.0,
        altitude: 3280.0,
        throttle: 50.0,
        roll: 0.0,
    }
}

#[test]
fn nose_down_step_matches_hand_computation() {
    let dynamics = SimplifiedDynamics::default();
    let next = dynamics.advance(&near_stall(), ControlInput::new(-1.0, 0.0), DEFAULT_DT);

    assert!((next.alpha - 14.5).abs() < EPS, "alpha {}", next.alpha);
    assert!((next.speed - 50.0).abs() < EPS);
    assert!((next.pitch_rate + 0.05).abs() < EPS);
    // pitch angle integrates the already-updated pitch rate
    assert!((next.pitch_angle - 14.995).abs() < EPS, "pitch {}", next.pitch_angle);
    assert!((next.altitude - 3280.5).abs() < EPS, "altitude {}", next.altitude);
    assert!((next.roll + 0.2).abs() < EPS);
    assert_eq!(next.throttle, 0.0);
}

#[test]
fn altitude_uses_updated_speed() {
    let dynamics = SimplifiedDynamics::default();
    let next = dynamics.advance(&near_stall(), ControlInput::new(0.0, 1.0), 0.5);
    // speed 50.1, climb 50.1 * 0.1 * 0.5
    assert!((next.speed - 50.1).abs() < EPS);
    assert!((next.altitude - (3280.0 + 2.505)).abs() < 1e-3, "altitude {}", next.altitude);
}

#[test]
fn upper_limits_are_clipped() {
    let dynamics = SimplifiedDynamics::default();
    let state = AircraftState {
        alpha: 19.8,
        speed: 99.95,
        roll: 29.9,
        ..near_stall()
    };
    let next = dynamics.advance(&state, ControlInput::new(1.0, 1.0), DEFAULT_DT);

    assert_eq!(next.alpha, 20.0);
    assert_eq!(next.speed, 100.0);
    assert_eq!(next.roll, 30.0);
    assert_eq!(next.throttle, 100.0);
}

#[test]
fn lower_limits_are_clipped() {
    let dynamics = SimplifiedDynamics::default();
    let state = AircraftState {
        alpha: -9.8,
        speed: 0.05,
        altitude: 0.0,
        roll: -29.9,
        ..near_stall()
    };
    let next = dynamics.advance(&state, ControlInput::new(-1.0, -1.0), DEFAULT_DT);

    assert_eq!(next.alpha, -10.0);
    assert_eq!(next.speed, 0.0);
    assert_eq!(next.altitude, 0.0, "altitude floors at zero");
    assert_eq!(next.roll, -30.0);
    assert_eq!(next.throttle, 0.0, "negative throttle command stores 0%");
}

#[test]
fn integrate_leaves_clipping_to_clip() {
    let dynamics = SimplifiedDynamics::default();
    let state = AircraftState {
        speed: 0.0,
        altitude: 0.5,
        ..near_stall()
    };
    let control = ControlInput::new(0.0, -10_000.0);

    let raw = dynamics.integrate(&state, control, DEFAULT_DT);
    assert!((raw.speed + 1000.0).abs() < EPS);
    assert!((raw.altitude + 9.5).abs() < EPS, "altitude {}", raw.altitude);
    assert_eq!(raw.throttle, -1_000_000.0);

    let clipped = dynamics.clip(raw);
    assert_eq!(clipped.altitude, 0.0);
    assert_eq!(clipped.speed, 0.0);
    assert_eq!(clipped, dynamics.advance(&state, control, DEFAULT_DT));
}

#[test]
fn extreme_finite_controls_stay_in_limits() {
    let dynamics = SimplifiedDynamics::default();
    let limits = StateLimits::default();
    let mut state = near_stall();
    for i in 0..200 {
        let sign = if i % 3 == 0 { -1.0 } else { 1.0 };
        let control = ControlInput::new(sign * 1.0e6, -sign * 1.0e6);
        state = dynamics.advance(&state, control, DEFAULT_DT);
        assert!(limits.contains(&state), "step {i}: {state:?}");
    }
}

#[test]
fn custom_coefficients_are_used() {
    let dynamics = SimplifiedDynamics {
        coefficients: DynamicsCoefficients {
            alpha_per_elevator: 2.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let next = dynamics.advance(&near_stall(), ControlInput::new(-1.0, 0.0), DEFAULT_DT);
    assert!((next.alpha - 13.0).abs() < EPS);
}

#[test]
fn initial_state_is_seeded_and_in_range() {
    println!("\n=== Testing Initial Condition Sampling ===");

    let dynamics = SimplifiedDynamics::default();
    for seed in 0..100 {
        let a = dynamics.initial_state(&mut fastrand::Rng::with_seed(seed));
        let b = dynamics.initial_state(&mut fastrand::Rng::with_seed(seed));
        assert_eq!(a, b, "seed {seed} must reproduce the same state");

        assert!((12.0..=18.0).contains(&a.alpha), "alpha {}", a.alpha);
        assert!((40.0..=60.0).contains(&a.speed), "speed {}", a.speed);
        assert!((-0.1..=0.1).contains(&a.pitch_rate));
        assert!((10.0..=20.0).contains(&a.pitch_angle));
        assert!((-5.0..=5.0).contains(&a.roll));
        assert_eq!(a.altitude, 3280.0);
        assert_eq!(a.throttle, 50.0);
    }

    let a = dynamics.initial_state(&mut fastrand::Rng::with_seed(1));
    let b = dynamics.initial_state(&mut fastrand::Rng::with_seed(2));
    assert_ne!(a, b);

    println!("✓ Initial conditions are reproducible!");
}
