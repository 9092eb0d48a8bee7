//! Win/lose detection by sphere-vs-box proximity.

use glam::Vec3;
use physics::sphere_intersects_aabb;

/// Radius of the rat's bounding sphere.
pub const PLAYER_RADIUS: f32 = 0.5;

/// What a region does to the rat on contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Trap,
    Hazard,
    Goal,
}

/// Axis-aligned box tested against the rat each frame. Attached to scene entities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutcomeRegion {
    pub kind: RegionKind,
    pub half_extents: Vec3,
}

impl OutcomeRegion {
    pub fn new(kind: RegionKind, half_extents: Vec3) -> Self {
        Self { kind, half_extents }
    }

    pub fn contains_sphere(&self, center: Vec3, sphere_center: Vec3, radius: f32) -> bool {
        sphere_intersects_aabb(sphere_center, radius, center, self.half_extents)
    }
}

/// A terminal result of the check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Stepped on the trap at this index.
    CaughtByTrap(usize),
    CaughtByHazard,
    ReachedGoal,
}

impl Outcome {
    pub fn is_death(self) -> bool {
        !matches!(self, Outcome::ReachedGoal)
    }
}

/// Region positions for one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct PlacedRegion {
    pub region: OutcomeRegion,
    pub center: Vec3,
}

/// Test the rat against traps, then the hazard, then the goal. First hit wins.
///
/// Traps are taken as an iterator so callers can place them lazily; the index
/// in `CaughtByTrap` counts the regions yielded.
pub fn check(
    player: Vec3,
    traps: impl IntoIterator<Item = PlacedRegion>,
    hazard: Option<&PlacedRegion>,
    goal: Option<&PlacedRegion>,
) -> Option<Outcome> {
    let hits = |placed: &PlacedRegion| placed.region.contains_sphere(placed.center, player, PLAYER_RADIUS);

    if let Some(i) = traps.into_iter().position(|placed| hits(&placed)) {
        return Some(Outcome::CaughtByTrap(i));
    }
    if hazard.is_some_and(hits) {
        return Some(Outcome::CaughtByHazard);
    }
    if goal.is_some_and(hits) {
        return Some(Outcome::ReachedGoal);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trap(x: f32, z: f32) -> PlacedRegion {
        PlacedRegion {
            region: OutcomeRegion::new(RegionKind::Trap, Vec3::new(0.5, 0.1, 0.5)),
            center: Vec3::new(x, 0.25, z),
        }
    }

    fn hazard(x: f32, z: f32) -> PlacedRegion {
        PlacedRegion {
            region: OutcomeRegion::new(RegionKind::Hazard, Vec3::new(0.5, 0.15, 0.5)),
            center: Vec3::new(x, 0.15, z),
        }
    }

    fn goal() -> PlacedRegion {
        PlacedRegion {
            region: OutcomeRegion::new(RegionKind::Goal, Vec3::new(0.6, 0.7, 0.6)),
            center: Vec3::new(6.0, 0.7, 6.0),
        }
    }

    #[test]
    fn clear_floor_has_no_outcome() {
        let traps = [trap(0.0, 0.0), trap(-3.0, 4.0)];
        let p = Vec3::new(-6.0, 0.5, -6.0);
        assert_eq!(check(p, traps, Some(&hazard(4.0, 4.0)), Some(&goal())), None);
    }

    #[test]
    fn trap_beats_hazard_and_goal() {
        let traps = [trap(-3.0, 4.0), trap(6.0, 6.0)];
        let p = Vec3::new(6.0, 0.5, 6.0);
        let result = check(p, traps, Some(&hazard(6.0, 6.0)), Some(&goal()));
        assert_eq!(result, Some(Outcome::CaughtByTrap(1)));
    }

    #[test]
    fn hazard_beats_goal() {
        let p = Vec3::new(6.0, 0.5, 6.0);
        let result = check(p, std::iter::empty(), Some(&hazard(6.0, 5.8)), Some(&goal()));
        assert_eq!(result, Some(Outcome::CaughtByHazard));
        assert!(result.unwrap().is_death());
    }

    #[test]
    fn goal_contact_wins() {
        let p = Vec3::new(6.0, 0.5, 6.0);
        let result = check(p, [trap(0.0, 0.0)], Some(&hazard(-4.0, -4.0)), Some(&goal()));
        assert_eq!(result, Some(Outcome::ReachedGoal));
        assert!(!result.unwrap().is_death());
    }

    #[test]
    fn repeated_check_is_idempotent() {
        let traps = [trap(0.0, 0.0)];
        let p = Vec3::new(0.3, 0.5, -0.2);
        let first = check(p, traps, None, Some(&goal()));
        let second = check(p, traps, None, Some(&goal()));
        assert_eq!(first, second);
        assert_eq!(first, Some(Outcome::CaughtByTrap(0)));
    }
}
