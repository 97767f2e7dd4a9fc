//! # Stall Recovery Environment
//!
//! [`StallRecoveryEnv`] wraps a [`DynamicsBackend`] with the task-specific
//! parts of an episode: the reward, the crash/recovery termination policy and
//! the per-episode counters.
//!
//! Each episode starts near the critical angle of attack. The agent is
//! rewarded for getting alpha back under [`StallTask::critical_alpha`] without
//! losing altitude, and the episode ends either when the aircraft reaches
//! the ground or after [`StallTask::required_recovery_steps`] consecutive steps
//! below [`StallTask::safe_alpha`].

use crate::env::{Env, Step, StepInfo, TerminationCause};
use physics::constants::{ACTION_SIZE, DEFAULT_DT, OBS_SIZE};
use physics::{AircraftState, ControlError, ControlInput, DynamicsBackend, SimplifiedDynamics};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const CRITICAL_ALPHA_DEG: f32 = 15.0;
pub const SAFE_ALPHA_DEG: f32 = 10.0;
pub const REQUIRED_RECOVERY_STEPS: u32 = 10;
pub const ALTITUDE_GAIN_WEIGHT: f32 = 0.1;
pub const ELEVATOR_EFFORT_WEIGHT: f32 = 0.01;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvError {
    #[error("environment not initialized: call reset before step")]
    NotInitialized,
    #[error("invalid action: {0}")]
    Control(#[from] ControlError),
    #[error("expected {expected} actions for the batch, got {actual}")]
    BatchSize { expected: usize, actual: usize },
}

/// Task thresholds and reward weights.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StallTask {
    /// Alpha above which every degree costs one unit of reward.
    pub critical_alpha: f32,
    /// Alpha below which a step counts toward recovery.
    pub safe_alpha: f32,
    pub required_recovery_steps: u32,
    pub altitude_gain_weight: f32,
    pub elevator_effort_weight: f32,
}

impl Default for StallTask {
    fn default() -> Self {
        Self {
            critical_alpha: CRITICAL_ALPHA_DEG,
            safe_alpha: SAFE_ALPHA_DEG,
            required_recovery_steps: REQUIRED_RECOVERY_STEPS,
            altitude_gain_weight: ALTITUDE_GAIN_WEIGHT,
            elevator_effort_weight: ELEVATOR_EFFORT_WEIGHT,
        }
    }
}

/// The three reward components of one step.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RewardTerms {
    /// `-(alpha - critical)` when above critical, else 0.
    pub stall_penalty: f32,
    pub altitude_gain: f32,
    /// Always `<= 0`.
    pub control_effort: f32,
}

impl RewardTerms {
    #[must_use]
    pub fn total(&self) -> f32 {
        self.stall_penalty + self.altitude_gain + self.control_effort
    }
}

impl StallTask {
    /// Reward components for a step that reached `state`.
    ///
    /// `altitude_change` is measured on the unclipped altitude, so a step that
    /// hits the ground is charged for the full drop below it.
    #[must_use]
    pub fn reward_terms(&self, state: &AircraftState, altitude_change: f32, control: ControlInput) -> RewardTerms {
        let stall_penalty = if state.alpha > self.critical_alpha {
            -(state.alpha - self.critical_alpha)
        } else {
            0.0
        };
        RewardTerms {
            stall_penalty,
            altitude_gain: self.altitude_gain_weight * altitude_change,
            control_effort: -self.elevator_effort_weight * control.elevator.abs(),
        }
    }

    /// Apply the termination policy to a freshly advanced state.
    ///
    /// A crash wins over recovery. Any step at or above the safe alpha breaks
    /// the recovery streak.
    pub fn check_termination(&self, state: &AircraftState, recovery_counter: &mut u32) -> Option<TerminationCause> {
        if state.altitude <= 0.0 {
            Some(TerminationCause::Crashed)
        } else if state.alpha < self.safe_alpha {
            *recovery_counter += 1;
            (*recovery_counter >= self.required_recovery_steps).then_some(TerminationCause::Recovered)
        } else {
            *recovery_counter = 0;
            None
        }
    }

    #[must_use]
    pub fn stall_margin(&self, alpha: f32) -> f32 {
        self.critical_alpha - alpha
    }

    #[must_use]
    pub fn is_stalled(&self, alpha: f32) -> bool {
        alpha > self.critical_alpha
    }
}

/// Construction-time settings of a [`StallRecoveryEnv`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvConfig {
    /// Fixed simulation step in seconds.
    pub dt: f32,
    /// Truncate episodes after this many steps. `None` never truncates.
    pub max_episode_steps: Option<u32>,
    pub task: StallTask,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            max_episode_steps: None,
            task: StallTask::default(),
        }
    }
}

/// Counters carried across the steps of one episode.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EpisodeProgress {
    pub prev_altitude: f32,
    pub recovery_counter: u32,
    pub step_count: u32,
}

#[derive(Clone, Debug)]
struct Episode {
    state: AircraftState,
    progress: EpisodeProgress,
    outcome: Option<TerminationCause>,
}

impl Episode {
    fn start(state: AircraftState) -> Self {
        Self {
            state,
            progress: EpisodeProgress {
                prev_altitude: state.altitude,
                ..Default::default()
            },
            outcome: None,
        }
    }
}

/// Stall-recovery task over any dynamics backend.
#[derive(Debug)]
pub struct StallRecoveryEnv<B: DynamicsBackend = SimplifiedDynamics> {
    backend: B,
    config: EnvConfig,
    rng: fastrand::Rng,
    episode: Option<Episode>,
}

impl StallRecoveryEnv<SimplifiedDynamics> {
    /// Simplified dynamics with default settings, seeded from entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_backend(SimplifiedDynamics::default(), EnvConfig::default())
    }
}

impl Default for StallRecoveryEnv<SimplifiedDynamics> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: DynamicsBackend> StallRecoveryEnv<B> {
    #[must_use]
    pub fn with_backend(backend: B, config: EnvConfig) -> Self {
        Self {
            backend,
            config,
            rng: fastrand::Rng::new(),
            episode: None,
        }
    }

    /// Reseed the environment's random stream used by unseeded resets.
    #[must_use]
    pub fn seeded(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    #[must_use]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Current state, `None` before the first reset.
    #[must_use]
    pub fn state(&self) -> Option<&AircraftState> {
        self.episode.as_ref().map(|e| &e.state)
    }

    #[must_use]
    pub fn progress(&self) -> Option<&EpisodeProgress> {
        self.episode.as_ref().map(|e| &e.progress)
    }

    /// How the current episode ended, if it has.
    #[must_use]
    pub fn outcome(&self) -> Option<TerminationCause> {
        self.episode.as_ref().and_then(|e| e.outcome)
    }

    /// Draw a new initial state from the backend and start an episode.
    pub fn reset_state(&mut self, seed: Option<u64>) -> AircraftState {
        if let Some(seed) = seed {
            self.rng = fastrand::Rng::with_seed(seed);
        }
        let state = self.backend.initial_state(&mut self.rng);
        self.reset_to(state)
    }

    /// Start an episode from an explicit state.
    pub fn reset_to(&mut self, state: AircraftState) -> AircraftState {
        debug!(
            alpha = state.alpha,
            speed = state.speed,
            altitude = state.altitude,
            "episode start"
        );
        self.episode = Some(Episode::start(state));
        state
    }

    /// Advance one step with a typed control input.
    ///
    /// # Errors
    ///
    /// [`EnvError::NotInitialized`] before the first reset and
    /// [`EnvError::Control`] for non-finite controls. The state is untouched
    /// in both cases.
    pub fn step_control(&mut self, control: ControlInput) -> Result<Step, EnvError> {
        let control = control.validated()?;
        let EnvConfig { dt, max_episode_steps, task } = self.config;
        let episode = self.episode.as_mut().ok_or(EnvError::NotInitialized)?;

        if let Some(cause) = episode.outcome {
            warn!(?cause, "stepping an episode that already ended; call reset");
        }

        let raw = self.backend.integrate(&episode.state, control, dt);
        let next = self.backend.clip(raw);
        let progress = &mut episode.progress;
        let reward = task
            .reward_terms(&next, raw.altitude - progress.prev_altitude, control)
            .total();
        progress.prev_altitude = next.altitude;
        progress.step_count += 1;
        episode.state = next;

        let cause = task.check_termination(&next, &mut progress.recovery_counter);
        let terminated = cause.is_some();
        let truncated = !terminated && max_episode_steps.is_some_and(|limit| progress.step_count >= limit);
        let cause = cause.or(truncated.then_some(TerminationCause::TimeLimit));

        if let Some(cause) = cause {
            if episode.outcome.is_none() {
                episode.outcome = Some(cause);
            }
            debug!(
                ?cause,
                steps = progress.step_count,
                alpha = next.alpha,
                altitude = next.altitude,
                "episode end"
            );
        }

        Ok(Step {
            observation: next.to_observation(),
            reward,
            terminated,
            truncated,
            info: StepInfo {
                cause,
                recovery_counter: progress.recovery_counter,
            },
        })
    }
}

impl<B: DynamicsBackend> Env for StallRecoveryEnv<B> {
    type Error = EnvError;

    fn reset(&mut self, seed: Option<u64>) -> Vec<f32> {
        self.reset_state(seed).to_observation()
    }

    fn step(&mut self, action: &[f32]) -> Result<Step, EnvError> {
        self.step_control(ControlInput::try_from(action)?)
    }

    fn obs_size(&self) -> usize {
        OBS_SIZE
    }

    fn action_size(&self) -> usize {
        ACTION_SIZE
    }
}
