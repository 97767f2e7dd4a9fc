//! Named constants of the simplified stall model.
//!
//! These are the defaults behind [`DynamicsCoefficients`], [`StateLimits`] and
//! [`InitialConditions`]. Scenario files may override any of them.
//!
//! [`DynamicsCoefficients`]: crate::DynamicsCoefficients
//! [`StateLimits`]: crate::StateLimits
//! [`InitialConditions`]: crate::InitialConditions

/// Default simulation step in seconds.
pub const DEFAULT_DT: f32 = 0.1;

// Per-step control sensitivities
pub const ALPHA_PER_ELEVATOR: f32 = 0.5;
pub const SPEED_PER_THROTTLE: f32 = 0.1;
pub const PITCH_RATE_PER_ELEVATOR: f32 = 0.05;
pub const ROLL_PER_ELEVATOR: f32 = 0.2;
/// Climb rate in ft/s per knot of airspeed.
pub const CLIMB_PER_KNOT: f32 = 0.1;
/// Throttle command [-1, 1] to stored percent.
pub const THROTTLE_PERCENT_SCALE: f32 = 100.0;

// State limits
pub const ALPHA_MIN_DEG: f32 = -10.0;
pub const ALPHA_MAX_DEG: f32 = 20.0;
pub const SPEED_MIN_KTS: f32 = 0.0;
pub const SPEED_MAX_KTS: f32 = 100.0;
pub const ROLL_LIMIT_DEG: f32 = 30.0;
pub const THROTTLE_MIN_PERCENT: f32 = 0.0;
pub const THROTTLE_MAX_PERCENT: f32 = 100.0;

// Initial conditions near the stall boundary
pub const INITIAL_ALPHA_DEG: [f32; 2] = [12.0, 18.0];
pub const INITIAL_SPEED_KTS: [f32; 2] = [40.0, 60.0];
pub const INITIAL_PITCH_RATE: [f32; 2] = [-0.1, 0.1];
pub const INITIAL_PITCH_ANGLE_DEG: [f32; 2] = [10.0, 20.0];
pub const INITIAL_ROLL_DEG: [f32; 2] = [-5.0, 5.0];
/// Roughly 1000 m.
pub const INITIAL_ALTITUDE_FT: f32 = 3280.0;
pub const INITIAL_THROTTLE_PERCENT: f32 = 50.0;

/// Length of the observation vector.
pub const OBS_SIZE: usize = 7;
/// Length of the action vector.
pub const ACTION_SIZE: usize = 2;
