use bevy::prelude::*;

use crate::{config::FlockingConfig, neighbors::NeighborAverages};

/// Steer the velocity toward the average velocity of neighbors
/// in the perception band.
pub(crate) fn steer(velocity: Vec3, averages: &NeighborAverages, config: &FlockingConfig) -> Vec3 {
    (averages.velocity - velocity) * config.alignment_weight
}
