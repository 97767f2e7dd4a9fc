//! Baseline controllers for driving the environment without a learned policy.

use physics::ControlInput;

/// Maps an observation to a control input.
pub trait Policy {
    fn act(&mut self, observation: &[f32]) -> ControlInput;
}

impl<F> Policy for F
where
    F: FnMut(&[f32]) -> ControlInput,
{
    fn act(&mut self, observation: &[f32]) -> ControlInput {
        self(observation)
    }
}

/// Neutral elevator, zero throttle command.
#[derive(Copy, Clone, Debug, Default)]
pub struct ZeroPolicy;

impl Policy for ZeroPolicy {
    fn act(&mut self, _observation: &[f32]) -> ControlInput {
        ControlInput::neutral()
    }
}

/// Repeats the same command every step.
#[derive(Copy, Clone, Debug, Default)]
pub struct ConstantPolicy(pub ControlInput);

impl Policy for ConstantPolicy {
    fn act(&mut self, _observation: &[f32]) -> ControlInput {
        self.0
    }
}

/// Proportional elevator toward a target angle of attack with fixed throttle.
#[derive(Copy, Clone, Debug)]
pub struct NoseDownPolicy {
    pub target_alpha: f32,
    pub gain: f32,
    pub throttle: f32,
}

impl Default for NoseDownPolicy {
    fn default() -> Self {
        Self {
            target_alpha: 5.0,
            gain: 0.5,
            throttle: 1.0,
        }
    }
}

impl Policy for NoseDownPolicy {
    fn act(&mut self, observation: &[f32]) -> ControlInput {
        let alpha = observation.first().copied().unwrap_or(self.target_alpha);
        let elevator = (-self.gain * (alpha - self.target_alpha)).clamp(-1.0, 1.0);
        ControlInput::new(elevator, self.throttle)
    }
}

/// Uniform controls in [-1, 1] on both channels.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: fastrand::Rng,
}

impl RandomPolicy {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn act(&mut self, _observation: &[f32]) -> ControlInput {
        let unit = || self.rng.f32() * 2.0 - 1.0;
        ControlInput::new(unit(), unit())
    }
}
