use bevy::prelude::*;
use enum_map::{Enum, EnumMap};
use rand::Rng;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::{
    behaviors::{alignment, bias, cohesion, containment, seek, separation, wander},
    config::FlockingConfig,
    movement::{integrate, limit_speed},
    neighbors::Neighborhood,
    velocity::BoidVelocity,
};

/// The contributions that change an agent's velocity during a step,
/// in the order they are applied.
#[derive(Debug, Copy, Clone, Enum, Hash, PartialEq, Eq, EnumIter, Display)]
pub enum Force {
    Alignment,
    Cohesion,
    Separation,
    Noise,
    Bias,
    SpeedLimit,
    Seek,
    Containment,
}

/// The velocity change each [Force] made during the most recent step.
pub type ForceBreakdown = EnumMap<Force, Vec3>;

/// Represents an autonomous agent of the swarm (a boid). It flocks with
/// the other agents, seeks its target point, and is kept inside the
/// swarm volume.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Boid {
    /// Stable index. Its parity picks the direction of the bias.
    pub(crate) id: usize,
    pub(crate) position: Vec3,
    pub(crate) velocity: BoidVelocity,
    /// Point the agent is steered toward. The origin unless set.
    pub(crate) target: Vec3,
    #[cfg_attr(feature = "serialize", serde(skip))]
    pub(crate) forces: ForceBreakdown,
}

impl Boid {
    /// Create a stationary agent at `position` seeking the origin.
    pub fn new(id: usize, position: Vec3) -> Self {
        Self {
            id,
            position,
            velocity: BoidVelocity::ZERO,
            target: Vec3::ZERO,
            forces: ForceBreakdown::default(),
        }
    }

    /// Set the velocity, already in units per tick.
    pub fn with_velocity(self, velocity: Vec3) -> Self {
        Self {
            velocity: BoidVelocity::new(velocity),
            ..self
        }
    }

    /// Set the velocity from a raw value, see [BoidVelocity::from_raw].
    pub fn with_raw_velocity(self, raw: Vec3) -> Self {
        Self {
            velocity: BoidVelocity::from_raw(raw),
            ..self
        }
    }

    /// Set the point the agent steers toward.
    pub fn with_target(self, target: Vec3) -> Self {
        Self { target, ..self }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> BoidVelocity {
        self.velocity
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// What each force did to the velocity in the last [Boid::step].
    pub fn forces(&self) -> &ForceBreakdown {
        &self.forces
    }

    /// Advance this agent by one tick. `neighbors` is every other agent of
    /// the population; they are only read. Each force is applied on top of
    /// the velocity left by the ones before it, so the order matters.
    pub fn step<'a, R: Rng>(
        &mut self,
        neighbors: impl IntoIterator<Item = &'a Boid>,
        config: &FlockingConfig,
        rng: &mut R,
    ) {
        self.forces = ForceBreakdown::default();
        let neighborhood = Neighborhood::scan(self, neighbors, config);

        if let Some(averages) = neighborhood.averages(config.averaging) {
            self.apply(
                Force::Alignment,
                alignment::steer(*self.velocity, &averages, config),
            );
            self.apply(
                Force::Cohesion,
                cohesion::steer(self.position, &averages, config),
            );
        }
        self.apply(Force::Separation, separation::steer(&neighborhood, config));
        self.apply(Force::Noise, wander::nudge(config, rng));
        self.apply(Force::Bias, bias::steer(self.id, *self.velocity, config));

        let before = *self.velocity;
        limit_speed(&mut self.velocity, config.speed);
        self.forces[Force::SpeedLimit] = *self.velocity - before;

        self.apply(Force::Seek, seek::steer(self.position, self.target, config));
        self.apply(
            Force::Containment,
            containment::steer(self.position, config),
        );

        integrate(&mut self.position, self.velocity, config.time_scale);
    }

    fn apply(&mut self, force: Force, delta: Vec3) {
        *self.velocity += delta;
        self.forces[force] = delta;
    }
}

/// Debug visualization of the agents. Every agent gets its velocity as a
/// green arrow; agent 0 also gets one arrow per force, scaled up so the
/// small ones stay visible.
pub(crate) fn debug_forces(mut gizmos: Gizmos, swarm: Option<Res<crate::swarm::Swarm>>) {
    const VELOCITY_SCALE: f32 = 2.0;
    const FORCE_SCALE: f32 = 40.0;

    let Some(swarm) = swarm else {
        return;
    };
    for boid in swarm.boids() {
        let end = boid.position + *boid.velocity * VELOCITY_SCALE;
        gizmos.arrow(boid.position, end, Color::srgb(0.0, 1.0, 0.0));
    }

    let Some(first) = swarm.boids().first() else {
        return;
    };
    for (force, delta) in first.forces.iter() {
        if delta.length_squared() < f32::EPSILON {
            continue;
        }
        let color = match force {
            Force::Alignment => Color::srgb(0.0, 0.5, 1.0),
            Force::Cohesion => Color::srgb(1.0, 0.0, 1.0),
            Force::Separation => Color::srgb(1.0, 0.0, 0.0),
            Force::Noise => Color::srgb(0.5, 0.5, 0.5),
            Force::Bias => Color::srgb(1.0, 1.0, 1.0),
            Force::SpeedLimit => Color::srgb(1.0, 0.5, 0.0),
            Force::Seek => Color::srgb(1.0, 1.0, 0.0),
            Force::Containment => Color::srgb(0.0, 1.0, 1.0),
        };
        gizmos.arrow(first.position, first.position + *delta * FORCE_SCALE, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    const NOBODY: [Boid; 0] = [];

    fn quiet_config() -> FlockingConfig {
        FlockingConfig::default().with_noise_amplitude(0.0)
    }

    #[test]
    fn test_builder() {
        let boid = Boid::new(3, Vec3::new(1.0, 2.0, 3.0))
            .with_raw_velocity(Vec3::new(10.0, 20.0, 30.0))
            .with_target(Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(boid.id(), 3);
        assert_eq!(boid.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(*boid.velocity(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(boid.target(), Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(Boid::new(0, Vec3::ONE).target(), Vec3::ZERO);
    }

    #[test]
    fn test_alignment_and_cohesion_from_perception_band() {
        let config = quiet_config();
        let mut rng = StdRng::seed_from_u64(0);
        let mut boid = Boid::new(0, Vec3::ZERO).with_velocity(Vec3::new(0.0, 4.0, 0.0));
        let neighbor = Boid::new(1, Vec3::new(12.0, 0.0, 0.0))
            .with_velocity(Vec3::new(5.0, 0.0, 0.0));

        boid.step([&neighbor], &config, &mut rng);

        // One neighbor, compounded: 5 + 5 / 1 = 10
        let alignment = boid.forces()[Force::Alignment];
        assert!(alignment.abs_diff_eq(Vec3::new(0.08, -0.032, 0.0), 0.00001));
        // 12 + 12 / 1 = 24, times 0.00005
        let cohesion = boid.forces()[Force::Cohesion];
        assert!(cohesion.abs_diff_eq(Vec3::new(0.0012, 0.0, 0.0), 0.000001));
        assert_eq!(boid.forces()[Force::Separation], Vec3::ZERO);
    }

    #[test]
    fn test_close_neighbor_only_separates() {
        let config = quiet_config();
        let mut rng = StdRng::seed_from_u64(0);
        let mut boid = Boid::new(0, Vec3::ZERO).with_velocity(Vec3::new(0.0, 4.0, 0.0));
        let neighbor = Boid::new(1, Vec3::new(0.0, 0.0, 5.0))
            .with_velocity(Vec3::new(5.0, 0.0, 0.0));

        boid.step([&neighbor], &config, &mut rng);

        assert_eq!(boid.forces()[Force::Alignment], Vec3::ZERO);
        assert_eq!(boid.forces()[Force::Cohesion], Vec3::ZERO);
        assert!(boid.forces()[Force::Separation].abs_diff_eq(Vec3::new(0.0, 0.0, -1.5), 0.00001));
    }

    #[test]
    fn test_speed_clamped_from_above() {
        let config = quiet_config();
        let mut rng = StdRng::seed_from_u64(0);
        let mut boid = Boid::new(0, Vec3::ZERO).with_velocity(Vec3::new(0.0, 4.0, 0.0));
        let crowd = [
            Boid::new(1, Vec3::new(9.0, 0.0, 0.0)),
            Boid::new(2, Vec3::new(9.0, 0.0, 0.0)),
            Boid::new(3, Vec3::new(9.0, 0.0, 0.0)),
        ];

        boid.step(&crowd, &config, &mut rng);

        assert!((boid.velocity().speed() - 6.0).abs() < 0.0001);
        assert_ne!(boid.forces()[Force::SpeedLimit], Vec3::ZERO);
        assert!(boid.velocity().x < 0.0);
    }

    #[test]
    fn test_speed_clamped_from_below() {
        let config = quiet_config();
        let mut rng = StdRng::seed_from_u64(0);
        let mut boid = Boid::new(1, Vec3::ZERO).with_velocity(Vec3::new(0.0, 0.0, 0.5));

        boid.step(&NOBODY, &config, &mut rng);

        assert!((boid.velocity().speed() - 3.0).abs() < 0.0001);
        assert_ne!(boid.forces()[Force::SpeedLimit], Vec3::ZERO);
    }

    #[test]
    fn test_zero_velocity_stays_finite() {
        let config = quiet_config().with_bias_rate(0.0);
        let mut rng = StdRng::seed_from_u64(0);
        let mut boid = Boid::new(0, Vec3::ZERO);

        boid.step(&NOBODY, &config, &mut rng);

        assert_eq!(*boid.velocity(), Vec3::ZERO);
        assert_eq!(boid.position(), Vec3::ZERO);
    }

    #[test]
    fn test_containment_turns_agent_around() {
        let config = quiet_config();
        let mut rng = StdRng::seed_from_u64(0);
        let position = Vec3::new(0.0, 0.0, 500.0);
        let mut boid = Boid::new(0, position);

        boid.step(&NOBODY, &config, &mut rng);

        let containment = boid.forces()[Force::Containment];
        assert!(containment.abs_diff_eq(Vec3::new(0.0, 0.0, -0.2), 0.00001));
        assert!(boid.velocity().dot(-position) > 0.0);
    }

    #[test]
    fn test_integration_uses_final_velocity() {
        let config = quiet_config().with_bias_rate(0.0);
        let mut rng = StdRng::seed_from_u64(0);
        let mut boid = Boid::new(0, Vec3::ZERO)
            .with_velocity(Vec3::new(4.0, 0.0, 0.0))
            .with_target(Vec3::ZERO);

        boid.step(&NOBODY, &config, &mut rng);

        assert!(boid.position().abs_diff_eq(Vec3::new(0.8, 0.0, 0.0), 0.00001));
    }
}
