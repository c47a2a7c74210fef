use bevy::prelude::*;
use derivative::Derivative;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use thiserror::Error;

use crate::velocity::SpeedBand;

/// How an agent is kept inside the swarm volume.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Reflect, EnumIter, Display)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Containment {
    /// Steer straight back toward the origin once outside
    /// a sphere of radius `space_radius`.
    #[default]
    Spherical,
    /// Push inward along each axis with a linear falloff inside
    /// `box_margin` of the faces of a cube with half extent `space_radius`.
    Box,
}

/// How the accumulated neighbor velocity and position are averaged
/// before alignment and cohesion are applied.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Reflect, EnumIter, Display)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum NeighborAveraging {
    /// `sum / n + sum / n²`. Divides once, then adds the average divided by
    /// the count again. Flocks noticeably tighter than a plain mean.
    #[default]
    Compounded,
    /// `sum / n`.
    Single,
}

/// Which direction is handed to the renderer as the facing of an agent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Reflect, EnumIter, Display)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Orientation {
    /// `(vx, vy, vx)`: the z component repeats vx. Agents bank
    /// oddly around the z axis, which is the established look.
    #[default]
    Legacy,
    /// `(vx, vy, vz)`.
    Velocity,
}

/// What neighbor state an agent reads while it steps.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Reflect, EnumIter, Display)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum UpdateOrder {
    /// Agents step in index order against the live population, so later
    /// agents see the already moved state of earlier ones in the same tick.
    #[default]
    Sequential,
    /// Every agent steps against a copy of the population taken
    /// before the tick started.
    Snapshot,
}

/// Tuning for the flocking rule and the swarm around it.
#[derive(Clone, Debug, PartialEq, Reflect, Derivative)]
#[derivative(Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct FlockingConfig {
    /// Neighbors closer than this push the agent away.
    #[derivative(Default(value = "10.0"))]
    pub separation_radius: f32,
    /// Neighbors between the separation radius and this distance
    /// count toward alignment and cohesion.
    #[derivative(Default(value = "15.0"))]
    pub perception_radius: f32,
    #[derivative(Default(value = "0.3"))]
    pub separation_weight: f32,
    #[derivative(Default(value = "0.008"))]
    pub alignment_weight: f32,
    #[derivative(Default(value = "0.00005"))]
    pub cohesion_weight: f32,
    /// Half width of the uniform noise added to each velocity component.
    #[derivative(Default(value = "0.025"))]
    pub noise_amplitude: f32,
    /// Smoothing factor of the parity bias on vx.
    #[derivative(Default(value = "0.001"))]
    pub bias_rate: f32,
    pub speed: SpeedBand,
    #[derivative(Default(value = "0.08"))]
    pub seek_weight: f32,
    pub containment: Containment,
    #[derivative(Default(value = "0.2"))]
    pub containment_weight: f32,
    /// Radius of the containment sphere, or half extent of the box.
    #[derivative(Default(value = "400.0"))]
    pub space_radius: f32,
    /// Depth of the falloff region of [Containment::Box].
    #[derivative(Default(value = "50.0"))]
    pub box_margin: f32,
    /// Velocity is divided by this before it is added to the position.
    #[derivative(Default(value = "5.0"))]
    pub time_scale: f32,
    pub averaging: NeighborAveraging,
    pub orientation: Orientation,
    pub update_order: UpdateOrder,
    /// Half extent of the cube new agents are scattered in.
    #[derivative(Default(value = "400.0"))]
    pub spawn_extent: f32,
    /// Bound of each raw velocity component of new agents,
    /// before the raw velocity scale is applied.
    #[derivative(Default(value = "60.0"))]
    pub spawn_raw_velocity: f32,
}

/// Reasons a [FlockingConfig] is rejected.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be finite and positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must be finite and not negative, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("perception radius {perception} is smaller than separation radius {separation}")]
    PerceptionInsideSeparation { separation: f32, perception: f32 },
    #[error("minimum speed {min} exceeds maximum speed {max}")]
    InvertedSpeedBand { min: f32, max: f32 },
    #[error("bias rate {0} must be between 0.0 and 1.0")]
    BiasRateOutOfRange(f32),
    #[error("box margin {margin} must not exceed the space radius {radius}")]
    MarginTooDeep { margin: f32, radius: f32 },
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

impl FlockingConfig {
    /// Check that the configuration can drive a simulation without
    /// producing non-finite state.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("separation radius", self.separation_radius)?;
        positive("perception radius", self.perception_radius)?;
        if self.perception_radius < self.separation_radius {
            return Err(ConfigError::PerceptionInsideSeparation {
                separation: self.separation_radius,
                perception: self.perception_radius,
            });
        }
        non_negative("separation weight", self.separation_weight)?;
        non_negative("alignment weight", self.alignment_weight)?;
        non_negative("cohesion weight", self.cohesion_weight)?;
        non_negative("noise amplitude", self.noise_amplitude)?;
        if !(0.0..=1.0).contains(&self.bias_rate) {
            return Err(ConfigError::BiasRateOutOfRange(self.bias_rate));
        }
        positive("minimum speed", self.speed.min)?;
        positive("maximum speed", self.speed.max)?;
        if self.speed.min > self.speed.max {
            return Err(ConfigError::InvertedSpeedBand {
                min: self.speed.min,
                max: self.speed.max,
            });
        }
        non_negative("seek weight", self.seek_weight)?;
        non_negative("containment weight", self.containment_weight)?;
        positive("space radius", self.space_radius)?;
        positive("box margin", self.box_margin)?;
        if self.box_margin > self.space_radius {
            return Err(ConfigError::MarginTooDeep {
                margin: self.box_margin,
                radius: self.space_radius,
            });
        }
        positive("time scale", self.time_scale)?;
        non_negative("spawn extent", self.spawn_extent)?;
        non_negative("spawn raw velocity", self.spawn_raw_velocity)?;
        Ok(())
    }

    /// Set the separation and perception radii.
    pub fn with_radii(mut self, separation: f32, perception: f32) -> Self {
        self.separation_radius = separation;
        self.perception_radius = perception;
        self
    }

    pub fn with_separation_weight(mut self, weight: f32) -> Self {
        self.separation_weight = weight;
        self
    }

    pub fn with_alignment_weight(mut self, weight: f32) -> Self {
        self.alignment_weight = weight;
        self
    }

    pub fn with_cohesion_weight(mut self, weight: f32) -> Self {
        self.cohesion_weight = weight;
        self
    }

    /// Set the half width of the per-component velocity noise.
    /// Zero turns the noise off.
    pub fn with_noise_amplitude(mut self, amplitude: f32) -> Self {
        self.noise_amplitude = amplitude;
        self
    }

    pub fn with_bias_rate(mut self, rate: f32) -> Self {
        self.bias_rate = rate;
        self
    }

    /// Set the band the speed is clamped into every step.
    pub fn with_speed(mut self, min: f32, max: f32) -> Self {
        self.speed = SpeedBand { min, max };
        self
    }

    pub fn with_seek_weight(mut self, weight: f32) -> Self {
        self.seek_weight = weight;
        self
    }

    /// Set the containment strategy and the size of its volume.
    pub fn with_containment(mut self, containment: Containment, space_radius: f32) -> Self {
        self.containment = containment;
        self.space_radius = space_radius;
        self
    }

    pub fn with_containment_weight(mut self, weight: f32) -> Self {
        self.containment_weight = weight;
        self
    }

    pub fn with_box_margin(mut self, margin: f32) -> Self {
        self.box_margin = margin;
        self
    }

    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    pub fn with_averaging(mut self, averaging: NeighborAveraging) -> Self {
        self.averaging = averaging;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_update_order(mut self, update_order: UpdateOrder) -> Self {
        self.update_order = update_order;
        self
    }

    /// Set how far apart and how fast newly spawned agents start.
    pub fn with_spawn(mut self, extent: f32, raw_velocity: f32) -> Self {
        self.spawn_extent = extent;
        self.spawn_raw_velocity = raw_velocity;
        self
    }
}
