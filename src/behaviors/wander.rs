use bevy::prelude::*;
use rand::Rng;

use crate::config::FlockingConfig;

/// Independent uniform noise on every velocity component. Keeps the
/// flock from settling into a perfectly steady state.
pub(crate) fn nudge<R: Rng>(config: &FlockingConfig, rng: &mut R) -> Vec3 {
    let amplitude = config.noise_amplitude;
    if amplitude <= 0.0 {
        return Vec3::ZERO;
    }
    Vec3::new(
        rng.random_range(-amplitude..=amplitude),
        rng.random_range(-amplitude..=amplitude),
        rng.random_range(-amplitude..=amplitude),
    )
}
