use bevy::prelude::*;
use derivative::Derivative;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Raw velocities handed to [BoidVelocity::from_raw] are divided by this.
pub const RAW_VELOCITY_SCALE: f32 = 10.0;

/// The band an agent's speed is clamped into once per step.
#[derive(Debug, Copy, Clone, PartialEq, Reflect, Derivative)]
#[derivative(Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct SpeedBand {
    #[derivative(Default(value = "3.0"))]
    pub min: f32,
    #[derivative(Default(value = "6.0"))]
    pub max: f32,
}

/// Velocity of an agent, in distance units per tick. The owning agent keeps
/// the speed inside a [SpeedBand]; the velocity only knows how to rescale.
#[derive(Debug, Default, Copy, Clone, PartialEq, Reflect, Deref, DerefMut)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct BoidVelocity(Vec3);

impl BoidVelocity {
    pub const ZERO: Self = Self(Vec3::ZERO);

    pub fn new(velocity: Vec3) -> Self {
        Self(velocity)
    }

    /// Build a velocity from a raw, unscaled value such as one drawn
    /// from the spawn range.
    pub fn from_raw(raw: Vec3) -> Self {
        Self(raw / RAW_VELOCITY_SCALE)
    }

    pub fn speed(&self) -> f32 {
        self.0.length()
    }

    /// Rescale down so the speed becomes `band.max`. `current_speed` must be
    /// the speed measured before this call. Returns false and leaves the
    /// velocity untouched if `current_speed` cannot be divided by.
    pub fn throttle(&mut self, current_speed: f32, band: SpeedBand) -> bool {
        self.rescale(current_speed, band.max)
    }

    /// Rescale up so the speed becomes `band.min`. Same contract as
    /// [BoidVelocity::throttle].
    pub fn speedup(&mut self, current_speed: f32, band: SpeedBand) -> bool {
        self.rescale(current_speed, band.min)
    }

    fn rescale(&mut self, current_speed: f32, speed: f32) -> bool {
        if !current_speed.is_finite() || current_speed <= 0.0 {
            debug!("skipping rescale of velocity {:?} at speed {current_speed}", self.0);
            return false;
        }
        self.0 *= speed / current_speed;
        true
    }
}

impl From<Vec3> for BoidVelocity {
    fn from(velocity: Vec3) -> Self {
        Self(velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_scales_down() {
        let velocity = BoidVelocity::from_raw(Vec3::new(30.0, -40.0, 0.0));
        assert_eq!(*velocity, Vec3::new(3.0, -4.0, 0.0));
        assert_eq!(velocity.speed(), 5.0);
    }

    #[test]
    fn test_throttle_and_speedup() {
        let band = SpeedBand::default();

        let mut fast = BoidVelocity::new(Vec3::new(0.0, 12.0, 0.0));
        assert!(fast.throttle(fast.speed(), band));
        assert!(fast.abs_diff_eq(Vec3::new(0.0, 6.0, 0.0), 0.0001));

        let mut slow = BoidVelocity::new(Vec3::new(1.0, 0.0, 0.0));
        assert!(slow.speedup(slow.speed(), band));
        assert!(slow.abs_diff_eq(Vec3::new(3.0, 0.0, 0.0), 0.0001));
    }

    #[test]
    fn test_rescale_uses_given_speed() {
        // The passed speed is trusted, not recomputed
        let mut velocity = BoidVelocity::new(Vec3::new(4.0, 0.0, 0.0));
        velocity.throttle(12.0, SpeedBand::default());
        assert!(velocity.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 0.0001));
    }

    #[test]
    fn test_zero_speed_is_skipped() {
        let mut velocity = BoidVelocity::ZERO;
        assert!(!velocity.speedup(0.0, SpeedBand::default()));
        assert!(!velocity.throttle(f32::NAN, SpeedBand::default()));
        assert_eq!(velocity, BoidVelocity::ZERO);
    }
}
