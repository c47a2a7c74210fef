use bevy::prelude::*;

use crate::velocity::{BoidVelocity, SpeedBand};

/// Clamp the speed into `band`. The two checks are independent and both
/// compare against the speed measured before either rescale.
pub(crate) fn limit_speed(velocity: &mut BoidVelocity, band: SpeedBand) {
    let speed = velocity.speed();
    if speed > band.max {
        velocity.throttle(speed, band);
    }
    if speed < band.min {
        velocity.speedup(speed, band);
    }
}

/// Advance the position by one tick. The velocity is measured in units per
/// `time_scale` ticks.
pub(crate) fn integrate(position: &mut Vec3, velocity: BoidVelocity, time_scale: f32) {
    *position += *velocity / time_scale;
}
