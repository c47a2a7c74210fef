use bevy::prelude::*;
use derivative::Derivative;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    agent::debug_forces,
    behaviors::containment::debug_containment,
    config::FlockingConfig,
    render::{SwarmPoses, sync_member_transforms},
    swarm::{Swarm, tick_swarm},
};

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct SwarmSystemSet;

/// Spawns a [Swarm] resource and advances it once per `FixedUpdate`.
/// Entities with a [crate::prelude::SwarmMember] component follow the
/// pose of their agent.
#[derive(Debug, Clone, Derivative)]
#[derivative(Default)]
pub struct SwarmPlugin {
    config: FlockingConfig,
    #[derivative(Default(value = "1000"))]
    population: usize,
    seed: Option<u64>,
    tick_rate_hz: Option<f64>,
}

impl SwarmPlugin {
    pub fn with_config(self, config: FlockingConfig) -> Self {
        Self { config, ..self }
    }

    /// Set the number of agents. It never changes after startup.
    pub fn with_population(self, population: usize) -> Self {
        Self { population, ..self }
    }

    /// Seed the random generator for a reproducible swarm. Without a seed
    /// the generator is seeded from the operating system.
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    /// Set how many ticks run per second. Without it the app's
    /// fixed timestep is left as is.
    pub fn with_tick_rate(self, hz: f64) -> Self {
        Self {
            tick_rate_hz: Some(hz),
            ..self
        }
    }
}

impl Plugin for SwarmPlugin {
    fn build(&self, app: &mut App) {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        match Swarm::spawn(self.config.clone(), self.population, rng) {
            Ok(swarm) => {
                info!(
                    "spawned swarm of {} agents ({} containment, {} update order)",
                    swarm.len(),
                    self.config.containment,
                    self.config.update_order
                );
                app.insert_resource(swarm);
            }
            Err(err) => error!("swarm not spawned: {err}"),
        }
        if let Some(hz) = self.tick_rate_hz {
            app.insert_resource(Time::<Fixed>::from_hz(hz));
        }
        app.init_resource::<SwarmPoses>();
        app.add_systems(
            FixedUpdate,
            (tick_swarm, sync_member_transforms)
                .chain()
                .in_set(SwarmSystemSet),
        );
    }
}

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct DebugSwarmSystem;

pub struct DebugSwarmPlugin;

impl Plugin for DebugSwarmPlugin {
    fn build(&self, app: &mut App) {
        let debug_systems = (debug_containment, debug_forces).in_set(DebugSwarmSystem);
        app.add_systems(Update, debug_systems);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Containment, render::SwarmMember};
    use bevy::MinimalPlugins;

    fn run_app_test<T>(plugin: SwarmPlugin, setup: impl FnOnce(&mut App) -> T) -> (App, T) {
        let mut app = App::new();

        app.add_plugins((MinimalPlugins, plugin));
        app.finish();
        app.cleanup();

        let result = setup(&mut app);
        (app, result)
    }

    fn run_ticks(app: &mut App, ticks: usize) {
        for _ in 0..ticks {
            app.world_mut().run_schedule(FixedUpdate);
        }
    }

    #[test]
    fn test_plugin_spawns_swarm() {
        let plugin = SwarmPlugin::default().with_population(25).with_seed(3);
        let (app, _) = run_app_test(plugin, |_| ());

        let swarm = app.world().resource::<Swarm>();
        assert_eq!(swarm.len(), 25);
        assert_eq!(swarm.ticks(), 0);
    }

    #[test]
    fn test_seeded_plugins_agree() {
        let plugin = SwarmPlugin::default().with_population(50).with_seed(11);
        let (mut app1, _) = run_app_test(plugin.clone(), |_| ());
        let (mut app2, _) = run_app_test(plugin, |_| ());

        run_ticks(&mut app1, 10);
        run_ticks(&mut app2, 10);

        let swarm1 = app1.world().resource::<Swarm>();
        let swarm2 = app2.world().resource::<Swarm>();
        assert_eq!(swarm1.ticks(), 10);
        assert_eq!(swarm1.boids(), swarm2.boids());
    }

    #[test]
    fn test_members_follow_their_agents() {
        let plugin = SwarmPlugin::default().with_population(3).with_seed(5);
        let (mut app, members) = run_app_test(plugin, |app| {
            (0..3)
                .map(|index| app.world_mut().spawn(SwarmMember(index)).id())
                .collect::<Vec<_>>()
        });

        run_ticks(&mut app, 1);

        let poses = app.world().resource::<SwarmPoses>().clone();
        assert_eq!(poses.len(), 3);
        let positions = app
            .world()
            .resource::<Swarm>()
            .boids()
            .iter()
            .map(|boid| boid.position())
            .collect::<Vec<_>>();
        for (index, member) in members.into_iter().enumerate() {
            let transform = app.world().get::<Transform>(member).unwrap();
            assert_eq!(transform.translation, positions[index]);
            assert_eq!(poses[index].position, positions[index]);
        }
    }

    #[test]
    fn test_invalid_config_spawns_nothing() {
        let config = FlockingConfig::default().with_containment(Containment::Box, -1.0);
        let plugin = SwarmPlugin::default().with_config(config);
        let (mut app, member) = run_app_test(plugin, |app| app.world_mut().spawn(SwarmMember(0)).id());

        run_ticks(&mut app, 2);

        assert!(app.world().get_resource::<Swarm>().is_none());
        let transform = app.world().get::<Transform>(member).unwrap();
        assert_eq!(*transform, Transform::default());
    }

    #[test]
    fn test_tick_rate() {
        let plugin = SwarmPlugin::default().with_population(1).with_tick_rate(60.0);
        let (app, _) = run_app_test(plugin, |_| ());
        let timestep = app.world().resource::<Time<Fixed>>().timestep();
        assert!((timestep.as_secs_f64() - 1.0 / 60.0).abs() < 1e-6);
    }
}
