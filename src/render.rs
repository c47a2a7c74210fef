use bevy::prelude::*;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::{agent::Boid, config::Orientation};

/// Where an agent is and which way it faces, as handed to the renderer
/// once per tick.
#[derive(Debug, Default, Copy, Clone, PartialEq, Reflect)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct BoidPose {
    pub position: Vec3,
    pub look_direction: Vec3,
}

impl BoidPose {
    pub fn of(boid: &Boid, orientation: Orientation) -> Self {
        Self {
            position: boid.position(),
            look_direction: look_direction(*boid.velocity(), orientation),
        }
    }
}

fn look_direction(velocity: Vec3, orientation: Orientation) -> Vec3 {
    match orientation {
        Orientation::Legacy => Vec3::new(velocity.x, velocity.y, velocity.x),
        Orientation::Velocity => velocity,
    }
}

/// Anything that draws the swarm. The swarm publishes every agent's pose
/// right after the agent has stepped.
pub trait RenderSink {
    fn publish(&mut self, index: usize, pose: BoidPose);
}

impl<F: FnMut(usize, BoidPose)> RenderSink for F {
    fn publish(&mut self, index: usize, pose: BoidPose) {
        self(index, pose)
    }
}

/// The poses published during the latest tick, indexed like the population.
#[derive(Resource, Debug, Default, Clone, Deref)]
pub struct SwarmPoses(Vec<BoidPose>);

impl RenderSink for SwarmPoses {
    fn publish(&mut self, index: usize, pose: BoidPose) {
        if index >= self.0.len() {
            self.0.resize_with(index + 1, BoidPose::default);
        }
        self.0[index] = pose;
    }
}

/// Marks an entity that renders agent `index` of the swarm. Its transform
/// follows the agent's pose after every tick.
#[derive(Component, Debug, Copy, Clone, PartialEq, Eq, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct SwarmMember(pub usize);

impl SwarmMember {
    pub fn index(&self) -> usize {
        self.0
    }
}

pub(crate) fn sync_member_transforms(
    poses: Res<SwarmPoses>,
    mut query: Query<(&SwarmMember, &mut Transform)>,
) {
    for (member, mut transform) in query.iter_mut() {
        let Some(pose) = poses.get(member.index()) else {
            continue;
        };
        transform.translation = pose.position;
        transform.look_to(pose.look_direction, Vec3::Y);
    }
}
