use bevy::prelude::*;
use itertools::{Itertools, MinMaxResult};
use rand::{Rng, rngs::StdRng};

use crate::{
    agent::Boid,
    config::{ConfigError, FlockingConfig, UpdateOrder},
    render::{BoidPose, RenderSink, SwarmPoses},
};

/// A fixed population of agents flocking together. Every [Swarm::tick]
/// steps each agent once and publishes where it ended up.
#[derive(Resource, Debug)]
pub struct Swarm {
    boids: Vec<Boid>,
    config: FlockingConfig,
    rng: StdRng,
    ticks: u64,
}

impl Swarm {
    /// Create a swarm from an explicit population. The noise of every step
    /// is drawn from `rng`, so a seeded generator makes runs reproducible.
    pub fn new(config: FlockingConfig, boids: Vec<Boid>, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            boids,
            config,
            rng,
            ticks: 0,
        })
    }

    /// Create `population` agents with ids `0..population`, scattered over
    /// the spawn cube with random velocities.
    pub fn spawn(
        config: FlockingConfig,
        population: usize,
        mut rng: StdRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let extent = config.spawn_extent;
        let raw = config.spawn_raw_velocity;
        let boids = (0..population)
            .map(|id| {
                let position = Vec3::new(
                    rng.random_range(-extent..=extent),
                    rng.random_range(-extent..=extent),
                    rng.random_range(-extent..=extent),
                );
                let raw_velocity = Vec3::new(
                    rng.random_range(-raw..=raw),
                    rng.random_range(-raw..=raw),
                    rng.random_range(-raw..=raw),
                );
                Boid::new(id, position).with_raw_velocity(raw_velocity)
            })
            .collect();
        Self::new(config, boids, rng)
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn config(&self) -> &FlockingConfig {
        &self.config
    }

    /// Replace the configuration. The old one is kept if the new one
    /// does not validate.
    pub fn set_config(&mut self, config: FlockingConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Set the target of agent `index`. Returns false if there is no such agent.
    pub fn set_target(&mut self, index: usize, target: Vec3) -> bool {
        let Some(boid) = self.boids.get_mut(index) else {
            return false;
        };
        boid.set_target(target);
        true
    }

    pub fn set_all_targets(&mut self, target: Vec3) {
        for boid in self.boids.iter_mut() {
            boid.set_target(target);
        }
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Slowest and fastest agent speeds.
    pub fn speed_range(&self) -> MinMaxResult<f32> {
        self.boids.iter().map(|boid| boid.velocity().speed()).minmax()
    }

    /// Step every agent once, in index order, publishing each agent's pose
    /// to `sink` as soon as it has stepped.
    pub fn tick(&mut self, sink: &mut impl RenderSink) {
        let orientation = self.config.orientation;
        match self.config.update_order {
            UpdateOrder::Sequential => {
                for index in 0..self.boids.len() {
                    let (before, rest) = self.boids.split_at_mut(index);
                    let Some((boid, after)) = rest.split_first_mut() else {
                        continue;
                    };
                    boid.step(before.iter().chain(after.iter()), &self.config, &mut self.rng);
                    sink.publish(index, BoidPose::of(boid, orientation));
                }
            }
            UpdateOrder::Snapshot => {
                let snapshot = self.boids.clone();
                for (index, boid) in self.boids.iter_mut().enumerate() {
                    let others = snapshot
                        .iter()
                        .enumerate()
                        .filter(|(other, _)| *other != index)
                        .map(|(_, other)| other);
                    boid.step(others, &self.config, &mut self.rng);
                    sink.publish(index, BoidPose::of(boid, orientation));
                }
            }
        }
        self.ticks += 1;
    }
}

/// How often the swarm reports its speed range.
const REPORT_INTERVAL: u64 = 600;

pub(crate) fn tick_swarm(swarm: Option<ResMut<Swarm>>, mut poses: ResMut<SwarmPoses>) {
    let Some(mut swarm) = swarm else {
        return;
    };
    swarm.tick(&mut *poses);
    if swarm.ticks() % REPORT_INTERVAL == 0 {
        if let MinMaxResult::MinMax(slowest, fastest) = swarm.speed_range() {
            debug!(
                "swarm tick {}: speeds between {slowest:.3} and {fastest:.3}",
                swarm.ticks()
            );
        }
    }
}
