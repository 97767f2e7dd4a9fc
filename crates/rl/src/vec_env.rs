//! Independent environment replicas stepped as a batch.
//!
//! Replicas share no state. Each one is `Send`, so a caller that wants
//! parallel rollouts can also move them onto separate threads instead.

use crate::env::Step;
use crate::stall::{EnvError, StallRecoveryEnv};
use physics::constants::OBS_SIZE;
use physics::{ControlInput, DynamicsBackend};

/// Result from stepping every replica once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepBatch {
    /// Observations after step, `[n_envs * OBS_SIZE]` flattened
    pub observations: Vec<f32>,
    pub rewards: Vec<f32>,
    pub terminals: Vec<bool>,
    pub truncations: Vec<bool>,
}

impl StepBatch {
    fn with_capacity(n: usize) -> Self {
        Self {
            observations: Vec::with_capacity(n * OBS_SIZE),
            rewards: Vec::with_capacity(n),
            terminals: Vec::with_capacity(n),
            truncations: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, step: Step) {
        self.observations.extend_from_slice(&step.observation);
        self.rewards.push(step.reward);
        self.terminals.push(step.terminated);
        self.truncations.push(step.truncated);
    }

    /// Terminal OR truncated, per replica.
    #[must_use]
    pub fn dones(&self) -> Vec<bool> {
        self.terminals
            .iter()
            .zip(&self.truncations)
            .map(|(&t, &tr)| t || tr)
            .collect()
    }
}

pub struct VecEnv<B: DynamicsBackend> {
    envs: Vec<StallRecoveryEnv<B>>,
}

impl<B: DynamicsBackend> VecEnv<B> {
    #[must_use]
    pub fn new(envs: Vec<StallRecoveryEnv<B>>) -> Self {
        Self { envs }
    }

    pub fn from_fn(n_envs: usize, make_env: impl FnMut() -> StallRecoveryEnv<B>) -> Self {
        Self::new(std::iter::repeat_with(make_env).take(n_envs).collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.envs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.envs.is_empty()
    }

    #[must_use]
    pub fn envs(&self) -> &[StallRecoveryEnv<B>] {
        &self.envs
    }

    /// Reset every replica, replica `i` with `seed + i`. Returns the
    /// flattened initial observations.
    pub fn reset_all(&mut self, seed: u64) -> Vec<f32> {
        let mut observations = Vec::with_capacity(self.envs.len() * OBS_SIZE);
        for (i, env) in self.envs.iter_mut().enumerate() {
            let state = env.reset_state(Some(seed.wrapping_add(i as u64)));
            observations.extend_from_slice(state.as_array());
        }
        observations
    }

    /// Step every replica with its own control.
    ///
    /// Finished replicas are not reset here; call [`reset_done`] with the
    /// returned batch.
    ///
    /// # Errors
    ///
    /// [`EnvError::BatchSize`] when `controls` does not match the replica
    /// count, otherwise the first replica error.
    ///
    /// [`reset_done`]: VecEnv::reset_done
    pub fn step(&mut self, controls: &[ControlInput]) -> Result<StepBatch, EnvError> {
        if controls.len() != self.envs.len() {
            return Err(EnvError::BatchSize {
                expected: self.envs.len(),
                actual: controls.len(),
            });
        }
        let mut batch = StepBatch::with_capacity(self.envs.len());
        for (env, &control) in self.envs.iter_mut().zip(controls) {
            batch.push(env.step_control(control)?);
        }
        Ok(batch)
    }

    /// Reset the replicas that finished in `batch`, replica `i` with
    /// `seed + i`, writing their fresh observations back into the batch.
    /// Returns how many were reset.
    pub fn reset_done(&mut self, batch: &mut StepBatch, seed: u64) -> usize {
        let dones = batch.dones();
        let mut count = 0;
        for (i, env) in self.envs.iter_mut().enumerate() {
            if !dones.get(i).copied().unwrap_or(false) {
                continue;
            }
            let state = env.reset_state(Some(seed.wrapping_add(i as u64)));
            if let Some(slot) = batch.observations.get_mut(i * OBS_SIZE..(i + 1) * OBS_SIZE) {
                slot.copy_from_slice(state.as_array());
            }
            count += 1;
        }
        count
    }
}
