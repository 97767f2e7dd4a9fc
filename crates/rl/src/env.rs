use serde::{Deserialize, Serialize};

/// Reinforcement learning environment trait.
///
/// Inspired by classic frameworks like OpenAI Gym, this trait defines the core
/// interface an environment must provide. [`reset`] starts an episode and
/// returns the first observation; each call to [`step`] advances the
/// simulation by one action and returns the resulting [`Step`].
///
/// [`reset`]: Env::reset
/// [`step`]: Env::step
pub trait Env {
    type Error: std::error::Error;

    /// Start a new episode and return the initial observation vector.
    ///
    /// Passing a seed makes the initial state reproducible; `None` continues
    /// the environment's own random stream.
    fn reset(&mut self, seed: Option<u64>) -> Vec<f32>;

    /// Advance the environment by one action.
    ///
    /// # Errors
    ///
    /// Implementations reject malformed actions and calls made before the
    /// first [`reset`](Env::reset).
    fn step(&mut self, action: &[f32]) -> Result<Step, Self::Error>;

    /// Size of the observation vector.
    fn obs_size(&self) -> usize;

    /// Size of the action vector.
    fn action_size(&self) -> usize;
}

/// Why an episode ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationCause {
    /// Altitude reached zero.
    Crashed,
    /// Enough consecutive steps below the safe angle of attack.
    Recovered,
    /// The configured step limit was hit first.
    TimeLimit,
}

/// Side-channel data attached to a step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Set on the step that ends the episode.
    pub cause: Option<TerminationCause>,
    /// Consecutive safe-alpha steps after this step.
    pub recovery_counter: u32,
}

/// Result of a single [`Env::step`].
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub observation: Vec<f32>,
    pub reward: f32,
    /// Natural end of the episode (crash or recovery).
    pub terminated: bool,
    /// Episode cut short by a step limit.
    pub truncated: bool,
    pub info: StepInfo,
}

impl Step {
    #[must_use]
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}
