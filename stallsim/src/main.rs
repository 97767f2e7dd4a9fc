//! # stallsim
//!
//! Entry point for the stall-recovery command-line driver. Reports go to
//! stdout as JSON; `tracing` output goes to stderr.

use anyhow::Result;
use clap::{Parser, Subcommand};
use physics::ControlInput;
use stallsim::app::{self, EvaluateOptions, PolicyKind};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stallsim", version, about = "Stall-recovery environment driver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fly a baseline policy for a number of episodes and report the outcomes.
    Evaluate {
        /// Scenario JSON file; the built-in defaults when omitted.
        #[arg(long)]
        scenario: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = PolicyKind::NoseDown)]
        policy: PolicyKind,
        #[arg(long, default_value_t = 10)]
        episodes: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Rollout horizon per episode.
        #[arg(long, default_value_t = 500)]
        max_steps: u32,
        /// Elevator command for `--policy constant`.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        elevator: f32,
        /// Throttle command for `--policy constant`.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        throttle: f32,
        /// Write the last episode's flight log as JSON.
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Print the effective scenario configuration as JSON.
    Inspect {
        #[arg(long)]
        scenario: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // stdout carries the JSON report
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    match Cli::parse().command {
        Command::Evaluate {
            scenario,
            policy,
            episodes,
            seed,
            max_steps,
            elevator,
            throttle,
            log,
        } => {
            let options = EvaluateOptions {
                scenario,
                policy,
                episodes,
                seed,
                max_steps,
                constant: ControlInput::new(elevator, throttle),
                log,
            };
            let (_, report) = app::run_evaluate(&options)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Inspect { scenario } => {
            println!("{}", app::run_inspect(scenario.as_deref())?);
        }
    }
    Ok(())
}
