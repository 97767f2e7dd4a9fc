//! # Flight Telemetry
//!
//! Per-step flight records collected while an episode runs, and the stall
//! summary computed from them. A [`FlightLog`] serialises to JSON so runs can
//! be inspected or plotted outside this crate.

use physics::AircraftState;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightStatus {
    Normal,
    /// Alpha above the critical angle.
    Stall,
}

/// One row of the flight-data table.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    /// Seconds since the episode started, `0.0` for the first step.
    pub time: f32,
    pub alpha: f32,
    pub altitude: f32,
    pub speed: f32,
    /// ft/s over the last step.
    pub vertical_speed: f32,
    pub throttle: f32,
    pub roll: f32,
    /// `critical_alpha - alpha`; negative while stalled.
    pub stall_margin: f32,
    pub status: FlightStatus,
}

/// Summary of the stalled portion of an episode.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StallAnalysis {
    pub stall_records: usize,
    /// Mean altitude change from the episode start across stalled records.
    pub mean_stall_altitude_change: Option<f32>,
    /// Most negative stall margin seen.
    pub min_stall_margin: Option<f32>,
    /// Largest drop below the starting altitude, `0.0` if it never dropped.
    pub max_altitude_loss: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlightLog {
    pub dt: f32,
    pub critical_alpha: f32,
    pub initial_altitude: f32,
    pub records: Vec<FlightRecord>,
}

impl FlightLog {
    /// Start a log for an episode beginning at `initial`.
    #[must_use]
    pub fn start(dt: f32, critical_alpha: f32, initial: &AircraftState) -> Self {
        Self {
            dt,
            critical_alpha,
            initial_altitude: initial.altitude,
            records: Vec::new(),
        }
    }

    /// Append the state reached by the latest step.
    pub fn record(&mut self, state: &AircraftState) {
        let prev_altitude = self
            .records
            .last()
            .map_or(self.initial_altitude, |r| r.altitude);
        #[allow(clippy::cast_precision_loss)]
        let time = self.records.len() as f32 * self.dt;
        let stall_margin = self.critical_alpha - state.alpha;

        self.records.push(FlightRecord {
            time,
            alpha: state.alpha,
            altitude: state.altitude,
            speed: state.speed,
            vertical_speed: (state.altitude - prev_altitude) / self.dt,
            throttle: state.throttle,
            roll: state.roll,
            stall_margin,
            status: if stall_margin < 0.0 {
                FlightStatus::Stall
            } else {
                FlightStatus::Normal
            },
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stalls(&self) -> impl Iterator<Item = &FlightRecord> {
        self.records.iter().filter(|r| r.status == FlightStatus::Stall)
    }

    #[must_use]
    pub fn analyze(&self) -> StallAnalysis {
        let (count, change_sum, min_margin) = self.stalls().fold(
            (0_usize, 0.0_f32, None::<f32>),
            |(n, sum, min), r| {
                let margin = min.map_or(r.stall_margin, |m| m.min(r.stall_margin));
                (n + 1, sum + (r.altitude - self.initial_altitude), Some(margin))
            },
        );
        let lowest = self
            .records
            .iter()
            .map(|r| r.altitude)
            .fold(self.initial_altitude, f32::min);

        #[allow(clippy::cast_precision_loss)]
        let mean_change = (count > 0).then(|| change_sum / count as f32);

        StallAnalysis {
            stall_records: count,
            mean_stall_altitude_change: mean_change,
            min_stall_margin: min_margin,
            max_altitude_loss: self.initial_altitude - lowest,
        }
    }

    /// # Errors
    ///
    /// Propagates serialisation and I/O failures.
    pub fn write_json<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(writer, self)
    }

    /// # Errors
    ///
    /// Fails on malformed JSON or missing fields.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
