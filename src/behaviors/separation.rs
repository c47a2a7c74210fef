use bevy::prelude::*;

use crate::{config::FlockingConfig, neighbors::Neighborhood};

/// Push away from every neighbor inside the separation radius. Closer
/// neighbors contribute a smaller offset, so the push is the summed
/// offsets rather than an inverse-distance weighting.
pub(crate) fn steer(neighborhood: &Neighborhood, config: &FlockingConfig) -> Vec3 {
    neighborhood.separation * config.separation_weight
}
