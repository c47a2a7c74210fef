use bevy::prelude::*;

use crate::{
    agent::Boid,
    config::{FlockingConfig, NeighborAveraging},
};

/// What an agent learned about the rest of the population in one scan.
/// The two distance bands are disjoint: a neighbor close enough to
/// separate from does not also count toward alignment and cohesion.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub(crate) struct Neighborhood {
    /// Sum of `self - neighbor` over neighbors inside the separation radius.
    pub(crate) separation: Vec3,
    /// Sum of velocities of neighbors in the perception band.
    pub(crate) velocity_sum: Vec3,
    /// Sum of positions of neighbors in the perception band.
    pub(crate) position_sum: Vec3,
    /// Number of neighbors in the perception band.
    pub(crate) count: usize,
}

/// Averaged neighbor state used by alignment and cohesion.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct NeighborAverages {
    pub(crate) velocity: Vec3,
    pub(crate) position: Vec3,
}

impl Neighborhood {
    /// Scan `others`, which must not contain `boid` itself.
    pub(crate) fn scan<'a>(
        boid: &Boid,
        others: impl IntoIterator<Item = &'a Boid>,
        config: &FlockingConfig,
    ) -> Self {
        let mut neighborhood = Self::default();
        for other in others {
            let distance = boid.position.distance(other.position);
            if distance < config.separation_radius {
                neighborhood.separation += boid.position - other.position;
            } else if distance < config.perception_radius {
                neighborhood.velocity_sum += *other.velocity;
                neighborhood.position_sum += other.position;
                neighborhood.count += 1;
            }
        }
        neighborhood
    }

    /// Averages of the perception band, or None if nobody was in it.
    pub(crate) fn averages(&self, averaging: NeighborAveraging) -> Option<NeighborAverages> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f32;
        let mut velocity = self.velocity_sum / n;
        let mut position = self.position_sum / n;
        if let NeighborAveraging::Compounded = averaging {
            velocity += velocity / n;
            position += position / n;
        }
        Some(NeighborAverages { velocity, position })
    }
}
