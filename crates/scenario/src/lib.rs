#![deny(clippy::all, clippy::pedantic)]
//! Scenario files: JSON descriptions of a stall-recovery setup.
//!
//! Every field is optional and falls back to the built-in defaults, so `{}`
//! is the standard task. A scenario is validated before it is turned into an
//! environment.

use anyhow::{bail, ensure, Context, Result};
use physics::{Bounds, DynamicsCoefficients, InitialConditions, SimplifiedDynamics, StateLimits};
use rl::{EnvConfig, StallRecoveryEnv, StallTask};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    pub name: Option<String>,
    pub dt: f32,
    pub max_episode_steps: Option<u32>,
    pub task: StallTask,
    pub coefficients: DynamicsCoefficients,
    pub limits: StateLimits,
    pub initial_conditions: InitialConditions,
}

impl Default for Scenario {
    fn default() -> Self {
        let config = EnvConfig::default();
        Self {
            name: None,
            dt: config.dt,
            max_episode_steps: config.max_episode_steps,
            task: config.task,
            coefficients: DynamicsCoefficients::default(),
            limits: StateLimits::default(),
            initial_conditions: InitialConditions::default(),
        }
    }
}

impl FromStr for Scenario {
    type Err = anyhow::Error;

    fn from_str(json: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(json).context("malformed scenario JSON")?;
        scenario.validate()?;
        Ok(scenario)
    }
}

fn check_range(field: &str, range: Bounds) -> Result<()> {
    ensure!(
        range.min.is_finite() && range.max.is_finite(),
        "{field}: range bounds must be finite"
    );
    ensure!(
        range.min <= range.max,
        "{field}: min {} is greater than max {}",
        range.min,
        range.max
    );
    Ok(())
}

impl Scenario {
    /// Read and validate a scenario file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid JSON, or does not pass
    /// [`Scenario::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        json.parse::<Self>()
            .with_context(|| format!("loading scenario {}", path.display()))
    }

    /// # Errors
    ///
    /// Names the first field that is out of range.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.dt.is_finite() && self.dt > 0.0, "dt must be positive, got {}", self.dt);
        if self.max_episode_steps == Some(0) {
            bail!("max_episode_steps must be at least 1");
        }

        let task = &self.task;
        ensure!(
            task.critical_alpha.is_finite() && task.safe_alpha.is_finite(),
            "task: alpha thresholds must be finite"
        );
        ensure!(
            task.safe_alpha < task.critical_alpha,
            "task: safe_alpha {} must be below critical_alpha {}",
            task.safe_alpha,
            task.critical_alpha
        );
        ensure!(task.required_recovery_steps >= 1, "task: required_recovery_steps must be at least 1");
        ensure!(
            task.altitude_gain_weight.is_finite() && task.elevator_effort_weight.is_finite(),
            "task: reward weights must be finite"
        );

        let k = &self.coefficients;
        ensure!(
            [
                k.alpha_per_elevator,
                k.speed_per_throttle,
                k.pitch_rate_per_elevator,
                k.roll_per_elevator,
                k.climb_per_knot,
                k.throttle_percent_scale,
            ]
            .iter()
            .all(|v| v.is_finite()),
            "coefficients must be finite"
        );

        let limits = &self.limits;
        check_range("limits.alpha", limits.alpha)?;
        check_range("limits.speed", limits.speed)?;
        check_range("limits.roll", limits.roll)?;
        check_range("limits.throttle", limits.throttle)?;
        ensure!(
            limits.altitude_floor.is_finite() && limits.altitude_floor <= 0.0,
            "limits.altitude_floor must be at most 0 so the aircraft can reach the ground, got {}",
            limits.altitude_floor
        );

        let initial = &self.initial_conditions;
        check_range("initial_conditions.alpha", initial.alpha)?;
        check_range("initial_conditions.speed", initial.speed)?;
        check_range("initial_conditions.pitch_rate", initial.pitch_rate)?;
        check_range("initial_conditions.pitch_angle", initial.pitch_angle)?;
        check_range("initial_conditions.roll", initial.roll)?;
        ensure!(
            initial.altitude.is_finite() && initial.throttle.is_finite(),
            "initial_conditions: altitude and throttle must be finite"
        );
        Ok(())
    }

    #[must_use]
    pub fn env_config(&self) -> EnvConfig {
        EnvConfig {
            dt: self.dt,
            max_episode_steps: self.max_episode_steps,
            task: self.task,
        }
    }

    #[must_use]
    pub fn dynamics(&self) -> SimplifiedDynamics {
        SimplifiedDynamics::new(self.coefficients, self.limits, self.initial_conditions)
    }

    /// Build an environment, seeding its random stream when `seed` is given.
    ///
    /// # Errors
    ///
    /// Fails if the scenario does not validate.
    pub fn into_env(self, seed: Option<u64>) -> Result<StallRecoveryEnv<SimplifiedDynamics>> {
        self.validate()?;
        let env = StallRecoveryEnv::with_backend(self.dynamics(), self.env_config());
        Ok(match seed {
            Some(seed) => env.seeded(seed),
            None => env,
        })
    }

    /// # Errors
    ///
    /// Propagates serialisation failures.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
