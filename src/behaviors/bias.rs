use bevy::prelude::*;

use crate::config::FlockingConfig;

/// Where the parity bias pulls vx: +1 for even ids, -1 for odd ones.
pub(crate) fn bias_target(id: usize) -> f32 {
    if id % 2 == 0 { 1.0 } else { -1.0 }
}

/// Exponential moving average of vx toward the parity target. Half the
/// swarm drifts one way along x and half the other, which stops the
/// flock from collapsing into a single heading.
pub(crate) fn steer(id: usize, velocity: Vec3, config: &FlockingConfig) -> Vec3 {
    let rate = config.bias_rate;
    let vx = (1.0 - rate) * velocity.x + rate * bias_target(id);
    Vec3::new(vx - velocity.x, 0.0, 0.0)
}
