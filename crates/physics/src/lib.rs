#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Stall Physics
//!
//! Fixed-step flight dynamics for the stall-recovery task.
//!
//! This crate holds the aircraft-side half of the simulation: the
//! [`AircraftState`] vector, the [`ControlInput`] applied each step, and the
//! [`DynamicsBackend`] seam that advances one into the next. The bundled
//! [`SimplifiedDynamics`] backend is a deliberately crude model; it captures
//! the shape of a stall recovery (push the nose down, trade alpha for
//! airspeed) rather than real aerodynamics.
//!
//! ## Usage
//!
//! ```rust
//! use physics::{ControlInput, DynamicsBackend, SimplifiedDynamics};
//!
//! let dynamics = SimplifiedDynamics::default();
//! let mut rng = fastrand::Rng::with_seed(7);
//! let state = dynamics.initial_state(&mut rng);
//! let next = dynamics.advance(&state, ControlInput::new(-1.0, 1.0), 0.1);
//! assert!(next.alpha < state.alpha);
//! ```

pub mod constants;
pub mod dynamics;
pub mod types;

pub use dynamics::{
    DynamicsBackend, DynamicsCoefficients, InitialConditions, SimplifiedDynamics, StateLimits,
};
pub use types::{AircraftState, Bounds, ControlError, ControlInput};
