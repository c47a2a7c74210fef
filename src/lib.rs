mod agent;
mod behaviors;
mod config;
mod movement;
mod neighbors;
mod plugin;
pub mod prelude;
mod render;
mod swarm;
mod velocity;
