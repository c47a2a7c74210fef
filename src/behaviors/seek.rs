use bevy::prelude::*;

use crate::config::FlockingConfig;

/// Constant strength pull toward the agent's target point. Does not slow
/// down on approach, and has nothing to say once the agent is on the target.
pub(crate) fn steer(position: Vec3, target: Vec3, config: &FlockingConfig) -> Vec3 {
    let to_target = target - position;
    let distance = to_target.length();
    if distance <= 0.0 {
        return Vec3::ZERO;
    }
    to_target / distance * config.seek_weight
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seek_points_at_target() {
        let config = FlockingConfig::default();
        let delta = steer(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, &config);
        assert!(delta.abs_diff_eq(Vec3::new(0.0, 0.0, -0.08), 0.00001));
    }

    #[test]
    fn test_seek_on_target() {
        let config = FlockingConfig::default();
        let position = Vec3::new(3.0, 4.0, 5.0);
        assert_eq!(steer(position, position, &config), Vec3::ZERO);
    }
}
