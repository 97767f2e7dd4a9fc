#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Stall Recovery RL
//!
//! Reinforcement-learning side of the stall-recovery harness.
//!
//! -   [`env`]: the gym-style [`Env`] trait and its [`Step`] result.
//! -   [`stall`]: [`StallRecoveryEnv`], which adds the reward and the
//!     crash/recovery termination policy on top of a
//!     [`physics::DynamicsBackend`].
//! -   [`policy`]: baseline controllers standing in for a learned policy.
//! -   [`rollout`]: episode runner and multi-episode evaluation.
//! -   [`telemetry`]: per-step flight records and stall analysis.
//! -   [`vec_env`]: batches of independent replicas.
//!
//! The learning algorithm itself is not part of this crate; a trainer only
//! needs [`Env::reset`] and [`Env::step`].

pub mod env;
pub mod policy;
pub mod rollout;
pub mod stall;
pub mod telemetry;
pub mod vec_env;

pub use env::{Env, Step, StepInfo, TerminationCause};
pub use policy::{ConstantPolicy, NoseDownPolicy, Policy, RandomPolicy, ZeroPolicy};
pub use rollout::{evaluate, run_episode, EpisodeSummary, EvaluationReport};
pub use stall::{EnvConfig, EnvError, EpisodeProgress, RewardTerms, StallRecoveryEnv, StallTask};
pub use telemetry::{FlightLog, FlightRecord, FlightStatus, StallAnalysis};
pub use vec_env::{StepBatch, VecEnv};
