//! # stallsim
//!
//! A small reinforcement-learning environment for aircraft stall recovery.
//! An agent sees the aircraft's flight state and commands elevator and
//! throttle; it is rewarded for bringing the angle of attack back below the
//! critical value without losing altitude.
//!
//! ## The Crates
//!
//! -   **[`physics`]**: the aircraft state, control inputs and the
//!     [`physics::DynamicsBackend`] trait with its simplified arithmetic model.
//! -   **[`rl`]**: the environment itself ([`rl::StallRecoveryEnv`]), reward and
//!     termination policy, baseline policies, rollouts, flight logs and a
//!     batched [`rl::VecEnv`].
//! -   **[`scenario`]**: JSON scenario files that override thresholds,
//!     coefficients and initial-condition ranges.
//!
//! This crate adds the `stallsim` binary on top; see [`app`] for what its
//! subcommands do.
//!
//! ## Quick start
//!
//! ```text
//! stallsim evaluate --policy nose-down --episodes 20 --seed 7
//! stallsim evaluate --scenario gentle.json --log last_flight.json
//! stallsim inspect --scenario gentle.json
//! ```

pub mod app;
