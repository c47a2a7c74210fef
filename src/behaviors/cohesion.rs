use bevy::prelude::*;

use crate::{config::FlockingConfig, neighbors::NeighborAverages};

/// Steer toward the center of mass of neighbors in the perception band.
/// The pull grows with the distance to the center.
pub(crate) fn steer(position: Vec3, averages: &NeighborAverages, config: &FlockingConfig) -> Vec3 {
    (averages.position - position) * config.cohesion_weight
}
