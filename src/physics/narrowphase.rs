//! Narrowphase collision detection between a dynamic circle and another body.
//!
//! Both tests take body A as the circle being integrated and report a normal
//! pointing from A toward B. Intermediate vectors come from the caller's
//! scratch scope.

use glam::Vec2;
use rand::Rng;

use super::arena::ArenaScope;
use super::collider::Aabb;
use super::contact::ContactInfo;
use super::error::PhysicsResult;

/// Edge of a rectangle, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectEdge {
    /// `min.x`
    Left,
    /// `max.x`
    Right,
    /// `min.y`
    Bottom,
    /// `max.y`
    Top,
}

/// Pick the rectangle edge nearest to `point`, with its absolute distance.
///
/// Ties go to the first edge in left, right, bottom, top order.
pub fn closest_edge(point: Vec2, rect: &Aabb) -> (RectEdge, f32) {
    let candidates = [
        (RectEdge::Left, (point.x - rect.min.x).abs()),
        (RectEdge::Right, (point.x - rect.max.x).abs()),
        (RectEdge::Bottom, (point.y - rect.min.y).abs()),
        (RectEdge::Top, (point.y - rect.max.y).abs()),
    ];
    candidates
        .into_iter()
        .fold(candidates[0], |best, c| if c.1 < best.1 { c } else { best })
}

/// Uniformly distributed unit vector.
pub fn random_unit_vector<R: Rng>(rng: &mut R) -> Vec2 {
    Vec2::from_angle(rng.gen_range(0.0..std::f32::consts::TAU))
}

/// Circle-circle test.
///
/// Returns `None` when the centers are farther apart than the sum of the
/// radii; exactly touching circles report a contact with zero distance.
/// Coincident centers fall back to a random normal and maximal overlap.
pub fn circle_circle<R: Rng>(
    center_a: Vec2,
    radius_a: f32,
    center_b: Vec2,
    radius_b: f32,
    scope: &mut ArenaScope<'_>,
    rng: &mut R,
) -> PhysicsResult<Option<ContactInfo>> {
    let position = scope.acquire_with(center_a)?;
    let delta = scope.acquire_with(center_b - center_a)?;
    let distance = scope[delta].length();
    let radius_sum = radius_a + radius_b;

    if distance > radius_sum {
        return Ok(None);
    }

    if distance == 0.0 {
        tracing::warn!(?center_a, "coincident circle centers, using a random contact normal");
        scope[delta] = random_unit_vector(rng);
        return Ok(Some(ContactInfo {
            position: scope[position],
            normal: scope[delta],
            signed_distance: -radius_sum,
        }));
    }

    scope[delta] /= distance;
    let normal = scope[delta];
    scope[position] += normal * radius_a;

    Ok(Some(ContactInfo {
        position: scope[position],
        normal,
        signed_distance: distance - radius_sum,
    }))
}

/// Circle-vs-static-rectangle test.
///
/// Outside the rectangle the signed distance is the distance from the center
/// to the clamped point. When the center is inside, the nearest edge is used
/// and the distance is negated; the normal is flipped so it still points into
/// the rectangle. A center lying exactly on the boundary yields a zero normal.
pub fn circle_rectangle(
    center: Vec2,
    radius: f32,
    rect: &Aabb,
    scope: &mut ArenaScope<'_>,
) -> PhysicsResult<Option<ContactInfo>> {
    let origin = scope.acquire_with(center)?;
    let closest = scope.acquire_with(rect.clamp_point(center))?;

    let mut signed_distance = scope[origin].distance(scope[closest]);
    if signed_distance > radius {
        return Ok(None);
    }

    if rect.contains_point(center) {
        let (edge, distance) = closest_edge(center, rect);
        match edge {
            RectEdge::Left => scope[closest].x = rect.min.x,
            RectEdge::Right => scope[closest].x = rect.max.x,
            RectEdge::Bottom => scope[closest].y = rect.min.y,
            RectEdge::Top => scope[closest].y = rect.max.y,
        }
        signed_distance = -distance;
    }

    let towards = scope[closest] - scope[origin];
    let normal = scope.acquire_with(towards)?;
    if signed_distance < 0.0 {
        scope[normal] = -scope[normal];
    }
    scope[normal] = scope[normal].normalize_or_zero();

    Ok(Some(ContactInfo {
        position: scope[closest],
        normal: scope[normal],
        signed_distance,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::arena::ScratchArena;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f32 = 1e-5;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn rect(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Aabb {
        Aabb::new(Vec2::new(min_x, min_y), Vec2::new(max_x, max_y))
    }

    #[test]
    fn test_circle_circle_separated() {
        let mut arena = ScratchArena::default();
        let contact = circle_circle(
            Vec2::ZERO,
            10.0,
            Vec2::new(25.0, 0.0),
            10.0,
            &mut arena.scope(),
            &mut rng(),
        )
        .unwrap();
        assert!(contact.is_none());
        assert_eq!(arena.available(), arena.capacity());
    }

    #[test]
    fn test_circle_circle_overlapping() {
        let mut arena = ScratchArena::default();
        let contact = circle_circle(
            Vec2::ZERO,
            10.0,
            Vec2::new(15.0, 0.0),
            10.0,
            &mut arena.scope(),
            &mut rng(),
        )
        .unwrap()
        .unwrap();

        assert!((contact.normal - Vec2::X).length() < EPS);
        assert!((contact.signed_distance + 5.0).abs() < EPS);
        assert!((contact.position - Vec2::new(10.0, 0.0)).length() < EPS);
        assert!(contact.is_penetrating());
        assert_eq!(arena.available(), arena.capacity());
    }

    #[test]
    fn test_circle_circle_exactly_touching() {
        let mut arena = ScratchArena::default();
        let contact = circle_circle(
            Vec2::ZERO,
            10.0,
            Vec2::new(0.0, 20.0),
            10.0,
            &mut arena.scope(),
            &mut rng(),
        )
        .unwrap()
        .unwrap();
        assert!(contact.signed_distance.abs() < EPS);
        assert!((contact.normal - Vec2::Y).length() < EPS);
        assert!(!contact.is_penetrating());
    }

    #[test]
    fn test_circle_circle_coincident_centers() {
        let mut arena = ScratchArena::default();
        let center = Vec2::new(3.0, 4.0);
        let contact = circle_circle(center, 2.0, center, 3.0, &mut arena.scope(), &mut rng())
            .unwrap()
            .unwrap();

        assert!((contact.normal.length() - 1.0).abs() < EPS);
        assert_eq!(contact.signed_distance, -5.0);
        assert_eq!(contact.position, center);
    }

    #[test]
    fn test_circle_rectangle_resting_on_floor() {
        let mut arena = ScratchArena::default();
        // Floor surface at y = 50, y grows downward.
        let floor = rect(0.0, 100.0, 50.0, 60.0);
        let contact = circle_rectangle(Vec2::new(50.0, 45.0), 10.0, &floor, &mut arena.scope())
            .unwrap()
            .unwrap();

        assert!((contact.signed_distance - 5.0).abs() < EPS);
        assert!((contact.normal - Vec2::Y).length() < EPS);
        assert!((contact.position - Vec2::new(50.0, 50.0)).length() < EPS);
        assert_eq!(arena.available(), arena.capacity());
    }

    #[test]
    fn test_circle_rectangle_out_of_reach() {
        let mut arena = ScratchArena::default();
        let floor = rect(0.0, 100.0, 50.0, 60.0);
        let contact =
            circle_rectangle(Vec2::new(50.0, 30.0), 10.0, &floor, &mut arena.scope()).unwrap();
        assert!(contact.is_none());
    }

    #[test]
    fn test_circle_rectangle_corner() {
        let mut arena = ScratchArena::default();
        let block = rect(0.0, 10.0, 0.0, 10.0);
        let contact = circle_rectangle(Vec2::new(13.0, 14.0), 6.0, &block, &mut arena.scope())
            .unwrap()
            .unwrap();
        assert!((contact.signed_distance - 5.0).abs() < EPS);
        assert!((contact.position - Vec2::new(10.0, 10.0)).length() < EPS);
        assert!((contact.normal - Vec2::new(-0.6, -0.8)).length() < EPS);
    }

    #[test]
    fn test_circle_inside_near_bottom_edge() {
        let mut arena = ScratchArena::default();
        let block = rect(0.0, 100.0, 0.0, 40.0);
        let contact = circle_rectangle(Vec2::new(50.0, 3.0), 5.0, &block, &mut arena.scope())
            .unwrap()
            .unwrap();

        assert!((contact.signed_distance + 3.0).abs() < EPS);
        assert!((contact.position - Vec2::new(50.0, 0.0)).length() < EPS);
        assert!((contact.normal - Vec2::Y).length() < EPS);
    }

    #[test]
    fn test_circle_inside_near_top_edge() {
        let mut arena = ScratchArena::default();
        let block = rect(0.0, 100.0, 0.0, 40.0);
        let contact = circle_rectangle(Vec2::new(50.0, 38.0), 5.0, &block, &mut arena.scope())
            .unwrap()
            .unwrap();

        // Distance to the top edge is measured from max.y, not min.y.
        assert!((contact.signed_distance + 2.0).abs() < EPS);
        assert!((contact.position - Vec2::new(50.0, 40.0)).length() < EPS);
        assert!((contact.normal - Vec2::NEG_Y).length() < EPS);
    }

    #[test]
    fn test_circle_inside_near_right_edge() {
        let mut arena = ScratchArena::default();
        let block = rect(0.0, 100.0, 0.0, 40.0);
        let contact = circle_rectangle(Vec2::new(99.0, 20.0), 5.0, &block, &mut arena.scope())
            .unwrap()
            .unwrap();
        assert!((contact.signed_distance + 1.0).abs() < EPS);
        assert!((contact.position - Vec2::new(100.0, 20.0)).length() < EPS);
        assert!((contact.normal - Vec2::NEG_X).length() < EPS);
    }

    #[test]
    fn test_closest_edge_tie_break() {
        let square = rect(0.0, 10.0, 0.0, 10.0);
        assert_eq!(closest_edge(Vec2::new(5.0, 5.0), &square), (RectEdge::Left, 5.0));
        assert_eq!(closest_edge(Vec2::new(8.0, 8.0), &square), (RectEdge::Right, 2.0));
        assert_eq!(closest_edge(Vec2::new(5.0, 1.0), &square).0, RectEdge::Bottom);
        assert_eq!(closest_edge(Vec2::new(5.0, 9.5), &square).0, RectEdge::Top);
    }

    #[test]
    fn test_random_unit_vector_is_unit() {
        let mut rng = rng();
        for _ in 0..32 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < EPS);
        }
    }
}
