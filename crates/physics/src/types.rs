use crate::constants::{ACTION_SIZE, OBS_SIZE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longitudinal/lateral state of the aircraft.
///
/// Field order is the observation order, and the struct is `Pod` so the
/// observation vector is a plain cast of the state.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize)]
pub struct AircraftState {
    /// Angle of attack (deg)
    pub alpha: f32,
    /// Airspeed (kts)
    pub speed: f32,
    /// Pitch rate (rad/s)
    pub pitch_rate: f32,
    /// Pitch attitude (deg)
    pub pitch_angle: f32,
    /// Altitude (ft)
    pub altitude: f32,
    /// Throttle (percent)
    pub throttle: f32,
    /// Bank angle (deg)
    pub roll: f32,
}

impl AircraftState {
    #[must_use]
    pub fn as_array(&self) -> &[f32; OBS_SIZE] {
        bytemuck::cast_ref(self)
    }

    #[must_use]
    pub fn from_array(values: [f32; OBS_SIZE]) -> Self {
        bytemuck::cast(values)
    }

    #[must_use]
    pub fn to_observation(&self) -> Vec<f32> {
        self.as_array().to_vec()
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.as_array().iter().all(|v| v.is_finite())
    }
}

/// Rejected action vectors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControlError {
    #[error("action has {actual} components, expected {expected}")]
    Arity { expected: usize, actual: usize },
    #[error("action component {index} is not finite: {value}")]
    NonFinite { index: usize, value: f32 },
}

/// One control command. Values are conventionally in [-1, 1] but are not
/// clamped here.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInput {
    pub elevator: f32,
    pub throttle: f32,
}

impl ControlInput {
    #[must_use]
    pub const fn new(elevator: f32, throttle: f32) -> Self {
        Self { elevator, throttle }
    }

    #[must_use]
    pub const fn neutral() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Validate finiteness of both components.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::NonFinite`] for the first NaN or infinite value.
    pub fn validated(self) -> Result<Self, ControlError> {
        for (index, value) in [self.elevator, self.throttle].into_iter().enumerate() {
            if !value.is_finite() {
                return Err(ControlError::NonFinite { index, value });
            }
        }
        Ok(self)
    }

    #[must_use]
    pub fn to_array(self) -> [f32; ACTION_SIZE] {
        [self.elevator, self.throttle]
    }
}

impl TryFrom<&[f32]> for ControlInput {
    type Error = ControlError;

    fn try_from(action: &[f32]) -> Result<Self, Self::Error> {
        match *action {
            [elevator, throttle] => Self::new(elevator, throttle).validated(),
            _ => Err(ControlError::Arity {
                expected: ACTION_SIZE,
                actual: action.len(),
            }),
        }
    }
}

impl From<[f32; ACTION_SIZE]> for ControlInput {
    fn from([elevator, throttle]: [f32; ACTION_SIZE]) -> Self {
        Self::new(elevator, throttle)
    }
}

/// Inclusive range a scalar is clipped to.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
}

impl Bounds {
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn clip(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    #[must_use]
    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}
