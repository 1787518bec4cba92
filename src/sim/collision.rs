//! Collision detection and response
//!
//! Walls use a swept-interval test per axis: the span of a body's extent before
//! and after the move tells us whether it crossed a barrier even when the
//! post-move extent has already left it behind. Body pairs exchange the
//! velocity components along their line of centers (equal-mass elastic bounce).

use glam::{DVec2, IVec2};

use super::geometry::{BoundingBox, Range, along, magnitude, unit};
use super::state::{Body, Coordinate};

/// Sign of a difference as -1, 0 or 1 (zero stays zero, unlike `f64::signum`)
#[inline]
fn direction_of(delta: f64) -> f64 {
    if delta > 0.0 {
        1.0
    } else if delta < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Positional correction for one axis against one barrier
///
/// Returns the offset that moves the body's leading edge back onto the
/// barrier, or 0 if the swept extent never strictly crossed it.
pub fn wall_correction(barrier: i32, before: Range<f64>, after: Range<f64>) -> f64 {
    let barrier = barrier as f64;
    let trajectory = before.span(&after);

    if !trajectory.contains(barrier) {
        return 0.0;
    }

    let direction = direction_of(after.end - before.end);
    // Leading edge: `end` when moving up the axis, `start` when moving down
    let distance = after.interpolate((direction + 1.0) / 2.0) - barrier;

    if distance * direction > 0.0 {
        -distance
    } else {
        0.0
    }
}

/// Apply a wall correction to one axis, reversing velocity on impact
///
/// Returns true if the body bounced.
pub fn collide_axis(coord: &mut Coordinate, barrier: i32, before: Range<f64>, after: Range<f64>) -> bool {
    let offset = wall_correction(barrier, before, after);

    coord.q += offset;
    if offset != 0.0 {
        coord.vq = -coord.vq;
        true
    } else {
        false
    }
}

/// Collide a body against the barrier lines `x = barrier.x` and `y = barrier.y`
///
/// `before` is the body's extent prior to this tick's integration; the
/// post-move extent is taken from the body's current position.
pub fn collide_walls(body: &mut Body, before: &BoundingBox<f64>, barrier: IVec2) -> bool {
    let after = body.extent();

    let hit_x = collide_axis(&mut body.center.x, barrier.x, before.horizontal, after.horizontal);
    let hit_y = collide_axis(&mut body.center.y, barrier.y, before.vertical, after.vertical);

    hit_x || hit_y
}

/// Outcome of testing one pair of bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Bodies do not overlap
    Clear,
    /// Bodies overlapped and exchanged momentum along `normal`
    Bounced {
        /// Unit vector from the right body's center toward the left body's
        normal: DVec2,
        /// Overlap depth along the normal
        penetration: f64,
    },
    /// Centers coincide; no normal exists so the pair was skipped
    Degenerate,
}

/// Resolve a circle-circle contact with a velocity-only response
///
/// The along-normal velocity components are swapped, tangential components
/// are untouched. Positions are not corrected here.
pub fn collide_bodies(left: &mut Body, right: &mut Body) -> Contact {
    let separation = left.position() - right.position();
    let reach = left.radius + right.radius;
    let distance_sq = magnitude(separation);

    if distance_sq >= reach * reach {
        return Contact::Clear;
    }

    let normal = match unit(separation) {
        Ok(normal) => normal,
        Err(err) => {
            log::warn!("Skipping coincident bodies: {err}");
            return Contact::Degenerate;
        }
    };

    let v_left = left.velocity();
    let v_right = right.velocity();

    let from_left = along(v_left, normal);
    let from_right = along(v_right, normal);

    left.center.set_velocity(v_left - from_left + from_right);
    right.center.set_velocity(v_right - from_right + from_left);

    let penetration = reach - distance_sq.sqrt();
    log::trace!("Contact normal={normal:?} penetration={penetration:.3}");

    Contact::Bounced { normal, penetration }
}

/// Strategy for the pairwise collision pass
///
/// Runs after every body has moved and hit the walls, before forces apply.
pub trait CollisionResolver: std::fmt::Debug {
    /// Resolve contacts across the roster, returning the number of bounces
    fn resolve(&self, bodies: &mut [Body]) -> usize;
}

/// Visit every unordered pair `(i, j)` with `i < j` in roster order
fn for_each_pair(bodies: &mut [Body], mut visit: impl FnMut(&mut Body, &mut Body)) {
    for j in 1..bodies.len() {
        let (head, tail) = bodies.split_at_mut(j);
        let right = &mut tail[0];
        for left in head.iter_mut() {
            visit(left, right);
        }
    }
}

/// Single sweep over all pairs with the velocity swap only
///
/// Overlapping bodies may stay overlapping after the bounce.
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepResolver;

impl CollisionResolver for SweepResolver {
    fn resolve(&self, bodies: &mut [Body]) -> usize {
        let mut bounces = 0;
        for_each_pair(bodies, |left, right| {
            if matches!(collide_bodies(left, right), Contact::Bounced { .. }) {
                bounces += 1;
            }
        });
        bounces
    }
}

/// Sweep with the velocity swap, then push each overlapping pair apart
///
/// Each body moves half the penetration depth along the contact normal, so
/// a pair leaves the pass just touching. Later pairs in the sweep see the
/// corrected positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeparatingResolver;

impl CollisionResolver for SeparatingResolver {
    fn resolve(&self, bodies: &mut [Body]) -> usize {
        let mut bounces = 0;
        for_each_pair(bodies, |left, right| {
            if let Contact::Bounced { normal, penetration } = collide_bodies(left, right) {
                let push = normal * (penetration / 2.0);
                left.center.x.q += push.x;
                left.center.y.q += push.y;
                right.center.x.q -= push.x;
                right.center.y.q -= push.y;
                bounces += 1;
            }
        });
        bounces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinetic(bodies: &[Body]) -> f64 {
        bodies.iter().map(|b| magnitude(b.velocity()) / 2.0).sum()
    }

    #[test]
    fn test_wall_correction_low_barrier() {
        // Extent moved from [0, 10] to [-100, -90] across x = 0
        let before = Range::new(0.0, 10.0);
        let after = Range::new(-100.0, -90.0);
        assert_eq!(wall_correction(0, before, after), 100.0);
    }

    #[test]
    fn test_wall_correction_high_barrier() {
        let before = Range::new(780.0, 790.0);
        let after = Range::new(795.0, 805.0);
        assert_eq!(wall_correction(800, before, after), -5.0);
    }

    #[test]
    fn test_wall_correction_no_crossing() {
        let before = Range::new(100.0, 110.0);
        let after = Range::new(90.0, 100.0);
        assert_eq!(wall_correction(0, before, after), 0.0);
        assert_eq!(wall_correction(800, before, after), 0.0);
    }

    #[test]
    fn test_wall_correction_stationary_straddle() {
        // No motion along the axis means no direction to correct in
        let extent = Range::new(-5.0, 5.0);
        assert_eq!(wall_correction(0, extent, extent), 0.0);
    }

    #[test]
    fn test_collide_axis_bounces() {
        let mut coord = Coordinate::new(-95.0, -100.0);
        let bounced = collide_axis(
            &mut coord,
            0,
            Range::new(0.0, 10.0),
            Range::new(-100.0, -90.0),
        );
        assert!(bounced);
        assert_eq!(coord.q, 5.0);
        assert_eq!(coord.vq, 100.0);
    }

    #[test]
    fn test_head_on_collision_swaps_velocities() {
        let v = 30.0;
        let mut bodies = vec![
            Body::moving(10.0, DVec2::new(100.0, 100.0), DVec2::new(v, 0.0)),
            Body::moving(10.0, DVec2::new(115.0, 100.0), DVec2::new(-v, 0.0)),
        ];
        let energy_before = kinetic(&bodies);

        let bounces = SweepResolver.resolve(&mut bodies);
        assert_eq!(bounces, 1);
        assert_eq!(bodies[0].velocity(), DVec2::new(-v, 0.0));
        assert_eq!(bodies[1].velocity(), DVec2::new(v, 0.0));
        assert!((kinetic(&bodies) - energy_before).abs() < 1e-9);

        // Velocity-only: positions untouched
        assert_eq!(bodies[0].position(), DVec2::new(100.0, 100.0));
    }

    #[test]
    fn test_oblique_collision_keeps_tangential_component() {
        let mut left = Body::moving(5.0, DVec2::new(0.0, 0.0), DVec2::new(4.0, 3.0));
        let mut right = Body::moving(5.0, DVec2::new(8.0, 0.0), DVec2::new(0.0, 0.0));

        let contact = collide_bodies(&mut left, &mut right);
        assert!(matches!(contact, Contact::Bounced { .. }));
        assert_eq!(left.velocity(), DVec2::new(0.0, 3.0));
        assert_eq!(right.velocity(), DVec2::new(4.0, 0.0));
    }

    #[test]
    fn test_separated_bodies_unchanged() {
        let mut bodies = vec![
            Body::moving(5.0, DVec2::new(0.0, 0.0), DVec2::new(1.0, 2.0)),
            Body::moving(5.0, DVec2::new(10.0, 0.0), DVec2::new(-3.0, 4.0)),
        ];
        // Exactly touching: magnitude == (r1 + r2)^2 is not a contact
        assert_eq!(SweepResolver.resolve(&mut bodies), 0);
        assert_eq!(bodies[0].velocity(), DVec2::new(1.0, 2.0));
        assert_eq!(bodies[1].velocity(), DVec2::new(-3.0, 4.0));
    }

    #[test]
    fn test_coincident_bodies_are_skipped() {
        let mut left = Body::moving(5.0, DVec2::new(50.0, 50.0), DVec2::new(1.0, 0.0));
        let mut right = Body::moving(5.0, DVec2::new(50.0, 50.0), DVec2::new(-1.0, 0.0));
        assert_eq!(collide_bodies(&mut left, &mut right), Contact::Degenerate);
        assert_eq!(left.velocity(), DVec2::new(1.0, 0.0));
        assert_eq!(right.velocity(), DVec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_separating_resolver_pushes_apart() {
        let mut bodies = vec![
            Body::moving(10.0, DVec2::new(100.0, 100.0), DVec2::new(1.0, 0.0)),
            Body::moving(10.0, DVec2::new(110.0, 100.0), DVec2::new(-1.0, 0.0)),
        ];
        assert_eq!(SeparatingResolver.resolve(&mut bodies), 1);

        let gap = (bodies[1].position() - bodies[0].position()).length();
        assert!((gap - 20.0).abs() < 1e-9);
        assert_eq!(bodies[0].position(), DVec2::new(95.0, 100.0));
        assert_eq!(bodies[0].velocity(), DVec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_every_pair_visited_once() {
        let mut bodies: Vec<Body> = (0..4)
            .map(|i| Body::moving(1.0, DVec2::new(i as f64, 0.0), DVec2::ZERO))
            .collect();
        let mut pairs = 0;
        for_each_pair(&mut bodies, |_, _| pairs += 1);
        assert_eq!(pairs, 6);
    }
}
