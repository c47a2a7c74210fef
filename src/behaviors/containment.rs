use bevy::prelude::*;

use crate::{
    config::{Containment, FlockingConfig},
    swarm::Swarm,
};

/// Steering that keeps an agent inside the swarm volume. Soft: the agent
/// may leave the volume, it just gets turned around.
pub(crate) fn steer(position: Vec3, config: &FlockingConfig) -> Vec3 {
    match config.containment {
        Containment::Spherical => sphere(position, config),
        Containment::Box => cube(position, config),
    }
}

fn sphere(position: Vec3, config: &FlockingConfig) -> Vec3 {
    let radius = position.length();
    if radius <= config.space_radius {
        return Vec3::ZERO;
    }
    -position / radius * config.containment_weight
}

fn cube(position: Vec3, config: &FlockingConfig) -> Vec3 {
    let inner = config.space_radius - config.box_margin;
    let axis = |p: f32| {
        let penetration = p.abs() - inner;
        if penetration <= 0.0 {
            return 0.0;
        }
        -p.signum() * config.containment_weight * penetration / config.box_margin
    };
    Vec3::new(axis(position.x), axis(position.y), axis(position.z))
}

/// Draw the volume the swarm is contained in.
pub(crate) fn debug_containment(mut gizmos: Gizmos, swarm: Option<Res<Swarm>>) {
    const VOLUME_COLOR: Color = Color::srgba(0.0, 1.0, 1.0, 0.3);
    const MARGIN_COLOR: Color = Color::srgba(1.0, 1.0, 0.0, 0.2);

    let Some(swarm) = swarm else {
        return;
    };
    let config = swarm.config();
    match config.containment {
        Containment::Spherical => {
            gizmos.sphere(Vec3::ZERO, config.space_radius, VOLUME_COLOR);
        }
        Containment::Box => {
            let outer = Vec3::splat(config.space_radius * 2.0);
            let inner = Vec3::splat((config.space_radius - config.box_margin) * 2.0);
            gizmos.cuboid(Transform::from_scale(outer), VOLUME_COLOR);
            gizmos.cuboid(Transform::from_scale(inner), MARGIN_COLOR);
        }
    }
}
