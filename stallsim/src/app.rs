//! # stallsim subcommands
//!
//! `evaluate` flies a baseline policy through a scenario and reports how the
//! episodes ended. `inspect` prints the fully-defaulted scenario so a partial
//! file can be checked before it is used.

use anyhow::{Context, Result};
use physics::ControlInput;
use rl::{
    evaluate, ConstantPolicy, EpisodeSummary, EvaluationReport, NoseDownPolicy, Policy, RandomPolicy,
    ZeroPolicy,
};
use scenario::Scenario;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Baseline controllers selectable from the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum PolicyKind {
    Zero,
    NoseDown,
    Random,
    Constant,
}

#[derive(Clone, Debug)]
pub struct EvaluateOptions {
    pub scenario: Option<PathBuf>,
    pub policy: PolicyKind,
    pub episodes: usize,
    pub seed: u64,
    pub max_steps: u32,
    /// Command repeated by [`PolicyKind::Constant`].
    pub constant: ControlInput,
    /// Where to write the last episode's flight log.
    pub log: Option<PathBuf>,
}

impl Default for EvaluateOptions {
    fn default() -> Self {
        Self {
            scenario: None,
            policy: PolicyKind::NoseDown,
            episodes: 10,
            seed: 0,
            max_steps: 500,
            constant: ControlInput::neutral(),
            log: None,
        }
    }
}

/// Load `path`, or fall back to the default scenario.
///
/// # Errors
///
/// Propagates read, parse and validation failures.
pub fn load_scenario(path: Option<&Path>) -> Result<Scenario> {
    match path {
        Some(path) => Scenario::load(path),
        None => Ok(Scenario::default()),
    }
}

fn build_policy(options: &EvaluateOptions) -> Box<dyn Policy> {
    match options.policy {
        PolicyKind::Zero => Box::new(ZeroPolicy),
        PolicyKind::NoseDown => Box::new(NoseDownPolicy::default()),
        PolicyKind::Random => Box::new(RandomPolicy::new(options.seed)),
        PolicyKind::Constant => Box::new(ConstantPolicy(options.constant)),
    }
}

/// Run the evaluation and return the per-episode summaries with their
/// aggregate.
///
/// # Errors
///
/// Fails on a bad scenario, an invalid constant command, or if the flight log
/// cannot be written.
pub fn run_evaluate(options: &EvaluateOptions) -> Result<(Vec<EpisodeSummary>, EvaluationReport)> {
    let scenario = load_scenario(options.scenario.as_deref())?;
    let label = scenario.name.clone().unwrap_or_else(|| "default".to_owned());
    let mut env = scenario.into_env(Some(options.seed))?;
    let mut policy = build_policy(options);

    tracing::info!(
        scenario = %label,
        policy = ?options.policy,
        episodes = options.episodes,
        seed = options.seed,
        "starting evaluation"
    );
    let summaries = evaluate(
        &mut env,
        policy.as_mut(),
        options.episodes,
        options.seed,
        options.max_steps,
    )
    .context("evaluation aborted")?;

    for (i, summary) in summaries.iter().enumerate() {
        let analysis = summary.log.analyze();
        tracing::info!(
            episode = i,
            stall_records = analysis.stall_records,
            max_altitude_loss = analysis.max_altitude_loss,
            min_stall_margin = ?analysis.min_stall_margin,
            "stall analysis"
        );
    }

    let report = EvaluationReport::from_summaries(&summaries);
    tracing::info!(
        mean_reward = report.mean_reward,
        recovered = report.recovered,
        crashed = report.crashed,
        unfinished = report.unfinished,
        mean_steps = report.mean_steps,
        "evaluation complete"
    );

    if let (Some(path), Some(last)) = (&options.log, summaries.last()) {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        last.log
            .write_json(BufWriter::new(file))
            .with_context(|| format!("writing flight log {}", path.display()))?;
        tracing::info!(path = %path.display(), records = last.log.len(), "flight log written");
    }

    Ok((summaries, report))
}

/// Render the effective scenario as pretty JSON.
///
/// # Errors
///
/// Propagates load and serialisation failures.
pub fn run_inspect(scenario: Option<&Path>) -> Result<String> {
    load_scenario(scenario)?.to_json_pretty()
}
