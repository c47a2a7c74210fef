use bevy::prelude::*;
use bevy_swarm::prelude::*;
use strum::IntoEnumIterator;

const NUM_BOIDS: usize = 300;
const TARGET_SPEED: f32 = 0.2;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(
            SwarmPlugin::default()
                .with_population(NUM_BOIDS)
                .with_tick_rate(60.0),
        )
        .add_plugins(DebugSwarmPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, (orbit_target, switch_strategies))
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let shape = meshes.add(Cone::new(2.0, 6.0));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.8, 0.2, 0.2),
        ..default()
    });
    for index in 0..NUM_BOIDS {
        commands.spawn((
            Mesh3d(shape.clone()),
            MeshMaterial3d(material.clone()),
            SwarmMember(index),
        ));
    }

    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 600.0, 1100.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Slowly move the shared target around a circle in the XZ plane.
fn orbit_target(time: Res<Time>, swarm: Option<ResMut<Swarm>>, mut gizmos: Gizmos) {
    let Some(mut swarm) = swarm else {
        return;
    };
    let angle = time.elapsed_secs() * TARGET_SPEED;
    let radius = swarm.config().space_radius * 0.5;
    let target = Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius);
    swarm.set_all_targets(target);
    gizmos.sphere(target, 5.0, Color::srgb(1.0, 1.0, 0.0));
}

fn next<T: IntoEnumIterator + PartialEq + Copy>(current: T) -> T {
    T::iter()
        .cycle()
        .skip_while(|value| *value != current)
        .nth(1)
        .unwrap_or(current)
}

/// C cycles containment, O cycles orientation, U cycles update order.
fn switch_strategies(keys: Res<ButtonInput<KeyCode>>, swarm: Option<ResMut<Swarm>>) {
    let Some(mut swarm) = swarm else {
        return;
    };
    let mut config = swarm.config().clone();
    if keys.just_pressed(KeyCode::KeyC) {
        config.containment = next(config.containment);
    } else if keys.just_pressed(KeyCode::KeyO) {
        config.orientation = next(config.orientation);
    } else if keys.just_pressed(KeyCode::KeyU) {
        config.update_order = next(config.update_order);
    } else {
        return;
    }
    match swarm.set_config(config) {
        Ok(()) => {
            let config = swarm.config();
            info!(
                "containment: {}, orientation: {}, update order: {}",
                config.containment, config.orientation, config.update_order
            );
        }
        Err(err) => warn!("rejected config: {err}"),
    }
}
