pub use crate::{
    agent::{Boid, Force, ForceBreakdown},
    config::{
        ConfigError, Containment, FlockingConfig, NeighborAveraging, Orientation, UpdateOrder,
    },
    plugin::{DebugSwarmPlugin, DebugSwarmSystem, SwarmPlugin, SwarmSystemSet},
    render::{BoidPose, RenderSink, SwarmMember, SwarmPoses},
    swarm::Swarm,
    velocity::{BoidVelocity, RAW_VELOCITY_SCALE, SpeedBand},
};
