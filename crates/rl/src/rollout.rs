use crate::env::TerminationCause;
use crate::policy::Policy;
use crate::stall::{EnvError, StallRecoveryEnv};
use crate::telemetry::FlightLog;
use physics::DynamicsBackend;
use serde::Serialize;
use tracing::{debug, info};

/// Outcome of one evaluated episode.
#[derive(Clone, Debug, Serialize)]
pub struct EpisodeSummary {
    pub total_reward: f32,
    pub steps: u32,
    pub terminated: bool,
    pub truncated: bool,
    /// `None` when the rollout horizon was reached first.
    pub cause: Option<TerminationCause>,
    pub final_observation: Vec<f32>,
    pub log: FlightLog,
}

impl EpisodeSummary {
    #[must_use]
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Reset `env` and let `policy` fly until the episode ends or `max_steps`
/// steps have been taken.
///
/// # Errors
///
/// Returns [`EnvError::Control`] if the policy emits a non-finite control.
pub fn run_episode<B, P>(
    env: &mut StallRecoveryEnv<B>,
    policy: &mut P,
    seed: Option<u64>,
    max_steps: u32,
) -> Result<EpisodeSummary, EnvError>
where
    B: DynamicsBackend,
    P: Policy + ?Sized,
{
    let initial = env.reset_state(seed);
    let config = *env.config();
    let mut log = FlightLog::start(config.dt, config.task.critical_alpha, &initial);
    let mut observation = initial.to_observation();
    let mut total_reward = 0.0;
    let mut steps = 0;
    let mut last_step = None;

    while steps < max_steps {
        let control = policy.act(&observation);
        let step = env.step_control(control)?;
        if let Some(state) = env.state() {
            log.record(state);
        }
        total_reward += step.reward;
        steps += 1;

        let done = step.done();
        observation.clone_from(&step.observation);
        last_step = Some(step);
        if done {
            break;
        }
    }

    let (terminated, truncated, cause) = last_step
        .filter(crate::env::Step::done)
        .map_or((false, false, None), |s| (s.terminated, s.truncated, s.info.cause));
    if cause.is_none() {
        debug!(max_steps, "rollout horizon reached before the episode ended");
    }

    Ok(EpisodeSummary {
        total_reward,
        steps,
        terminated,
        truncated,
        cause,
        final_observation: observation,
        log,
    })
}

/// Aggregate over several evaluated episodes.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub episodes: usize,
    pub mean_reward: f32,
    pub recovered: usize,
    pub crashed: usize,
    /// Time-limited or still running at the horizon.
    pub unfinished: usize,
    pub mean_steps: f32,
}

impl EvaluationReport {
    #[must_use]
    pub fn from_summaries(summaries: &[EpisodeSummary]) -> Self {
        if summaries.is_empty() {
            return Self::default();
        }
        let count = |cause: TerminationCause| summaries.iter().filter(|s| s.cause == Some(cause)).count();
        let recovered = count(TerminationCause::Recovered);
        let crashed = count(TerminationCause::Crashed);

        #[allow(clippy::cast_precision_loss)]
        let n = summaries.len() as f32;
        #[allow(clippy::cast_precision_loss)]
        let mean_steps = summaries.iter().map(|s| s.steps as f32).sum::<f32>() / n;

        Self {
            episodes: summaries.len(),
            mean_reward: summaries.iter().map(|s| s.total_reward).sum::<f32>() / n,
            recovered,
            crashed,
            unfinished: summaries.len() - recovered - crashed,
            mean_steps,
        }
    }
}

/// Evaluate `policy` over `episodes` episodes, seeding episode `i` with
/// `seed + i`.
///
/// # Errors
///
/// Stops at the first [`EnvError`].
pub fn evaluate<B, P>(
    env: &mut StallRecoveryEnv<B>,
    policy: &mut P,
    episodes: usize,
    seed: u64,
    max_steps: u32,
) -> Result<Vec<EpisodeSummary>, EnvError>
where
    B: DynamicsBackend,
    P: Policy + ?Sized,
{
    (0..episodes)
        .map(|i| {
            let summary = run_episode(env, policy, Some(seed.wrapping_add(i as u64)), max_steps)?;
            info!(
                episode = i,
                reward = summary.total_reward,
                steps = summary.steps,
                cause = ?summary.cause,
                "episode finished"
            );
            Ok(summary)
        })
        .collect()
}
