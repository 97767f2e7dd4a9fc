//! # Flight Dynamics Backends
//!
//! A [`DynamicsBackend`] owns the two physics-specific parts of an episode:
//! drawing an initial state and advancing a state by one fixed step under a
//! control input. Everything else (reward, termination, bookkeeping) belongs
//! to the environment that drives the backend.
//!
//! [`SimplifiedDynamics`] is the self-contained arithmetic model. It is a toy
//! approximation: each control channel adds a fixed increment per step and the
//! result is clipped to [`StateLimits`].

use crate::constants::{
    ALPHA_MAX_DEG, ALPHA_MIN_DEG, ALPHA_PER_ELEVATOR, CLIMB_PER_KNOT, INITIAL_ALPHA_DEG,
    INITIAL_ALTITUDE_FT, INITIAL_PITCH_ANGLE_DEG, INITIAL_PITCH_RATE, INITIAL_ROLL_DEG,
    INITIAL_SPEED_KTS, INITIAL_THROTTLE_PERCENT, PITCH_RATE_PER_ELEVATOR, ROLL_LIMIT_DEG,
    ROLL_PER_ELEVATOR, SPEED_MAX_KTS, SPEED_MIN_KTS, SPEED_PER_THROTTLE, THROTTLE_MAX_PERCENT,
    THROTTLE_MIN_PERCENT, THROTTLE_PERCENT_SCALE,
};
use crate::types::{AircraftState, Bounds, ControlInput};
use serde::{Deserialize, Serialize};

/// Capability interface for anything that can simulate the aircraft.
pub trait DynamicsBackend {
    /// Draw the starting state of a new episode.
    fn initial_state(&self, rng: &mut fastrand::Rng) -> AircraftState;

    /// Apply one step of `dt` seconds without any range limits.
    fn integrate(&self, state: &AircraftState, control: ControlInput, dt: f32) -> AircraftState;

    /// Bring an integrated state back inside the model's ranges.
    fn clip(&self, state: AircraftState) -> AircraftState {
        state
    }

    /// Advance `state` by one step of `dt` seconds.
    fn advance(&self, state: &AircraftState, control: ControlInput, dt: f32) -> AircraftState {
        self.clip(self.integrate(state, control, dt))
    }
}

/// Per-step sensitivities of the simplified model.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DynamicsCoefficients {
    pub alpha_per_elevator: f32,
    pub speed_per_throttle: f32,
    pub pitch_rate_per_elevator: f32,
    pub roll_per_elevator: f32,
    pub climb_per_knot: f32,
    pub throttle_percent_scale: f32,
}

impl Default for DynamicsCoefficients {
    fn default() -> Self {
        Self {
            alpha_per_elevator: ALPHA_PER_ELEVATOR,
            speed_per_throttle: SPEED_PER_THROTTLE,
            pitch_rate_per_elevator: PITCH_RATE_PER_ELEVATOR,
            roll_per_elevator: ROLL_PER_ELEVATOR,
            climb_per_knot: CLIMB_PER_KNOT,
            throttle_percent_scale: THROTTLE_PERCENT_SCALE,
        }
    }
}

/// Clipping ranges applied after every update. Altitude only has a floor.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StateLimits {
    pub alpha: Bounds,
    pub speed: Bounds,
    pub roll: Bounds,
    pub throttle: Bounds,
    pub altitude_floor: f32,
}

impl Default for StateLimits {
    fn default() -> Self {
        Self {
            alpha: Bounds::new(ALPHA_MIN_DEG, ALPHA_MAX_DEG),
            speed: Bounds::new(SPEED_MIN_KTS, SPEED_MAX_KTS),
            roll: Bounds::new(-ROLL_LIMIT_DEG, ROLL_LIMIT_DEG),
            throttle: Bounds::new(THROTTLE_MIN_PERCENT, THROTTLE_MAX_PERCENT),
            altitude_floor: 0.0,
        }
    }
}

impl StateLimits {
    /// Clip every bounded field of `state`.
    #[must_use]
    pub fn apply(&self, mut state: AircraftState) -> AircraftState {
        state.alpha = self.alpha.clip(state.alpha);
        state.speed = self.speed.clip(state.speed);
        state.altitude = state.altitude.max(self.altitude_floor);
        state.throttle = self.throttle.clip(state.throttle);
        state.roll = self.roll.clip(state.roll);
        state
    }

    #[must_use]
    pub fn contains(&self, state: &AircraftState) -> bool {
        self.alpha.contains(state.alpha)
            && self.speed.contains(state.speed)
            && self.roll.contains(state.roll)
            && self.throttle.contains(state.throttle)
            && state.altitude >= self.altitude_floor
    }
}

/// Uniform ranges for the randomised part of the initial state.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InitialConditions {
    pub alpha: Bounds,
    pub speed: Bounds,
    pub pitch_rate: Bounds,
    pub pitch_angle: Bounds,
    pub roll: Bounds,
    pub altitude: f32,
    pub throttle: f32,
}

impl Default for InitialConditions {
    fn default() -> Self {
        let range = |[lo, hi]: [f32; 2]| Bounds::new(lo, hi);
        Self {
            alpha: range(INITIAL_ALPHA_DEG),
            speed: range(INITIAL_SPEED_KTS),
            pitch_rate: range(INITIAL_PITCH_RATE),
            pitch_angle: range(INITIAL_PITCH_ANGLE_DEG),
            roll: range(INITIAL_ROLL_DEG),
            altitude: INITIAL_ALTITUDE_FT,
            throttle: INITIAL_THROTTLE_PERCENT,
        }
    }
}

impl InitialConditions {
    /// Draw a state. Fields are drawn in observation order so a given seed
    /// always yields the same state.
    #[must_use]
    pub fn sample(&self, rng: &mut fastrand::Rng) -> AircraftState {
        let draw = |range: &Bounds| range.min + (range.max - range.min) * rng.f32();
        AircraftState {
            alpha: draw(&self.alpha),
            speed: draw(&self.speed),
            pitch_rate: draw(&self.pitch_rate),
            pitch_angle: draw(&self.pitch_angle),
            altitude: self.altitude,
            throttle: self.throttle,
            roll: draw(&self.roll),
        }
    }
}

/// Self-contained arithmetic stall model.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimplifiedDynamics {
    pub coefficients: DynamicsCoefficients,
    pub limits: StateLimits,
    pub initial: InitialConditions,
}

impl SimplifiedDynamics {
    #[must_use]
    pub fn new(coefficients: DynamicsCoefficients, limits: StateLimits, initial: InitialConditions) -> Self {
        Self { coefficients, limits, initial }
    }
}

impl DynamicsBackend for SimplifiedDynamics {
    fn initial_state(&self, rng: &mut fastrand::Rng) -> AircraftState {
        self.initial.sample(rng)
    }

    fn integrate(&self, state: &AircraftState, control: ControlInput, dt: f32) -> AircraftState {
        let k = &self.coefficients;
        let mut next = *state;

        // Each update sees the values written by the lines above it.
        next.alpha += control.elevator * k.alpha_per_elevator;
        next.speed += control.throttle * k.speed_per_throttle;
        next.pitch_rate += control.elevator * k.pitch_rate_per_elevator;
        next.pitch_angle += next.pitch_rate * dt;
        next.altitude += next.speed * k.climb_per_knot * dt;
        next.roll += control.elevator * k.roll_per_elevator;
        next.throttle = control.throttle * k.throttle_percent_scale;
        next
    }

    fn clip(&self, state: AircraftState) -> AircraftState {
        self.limits.apply(state)
    }
}
