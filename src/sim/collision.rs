//! Collision detection and response for spherical bodies
//!
//! Detection is a swept test: it asks whether a body, moving at its current
//! velocity for one frame, reaches another body's sphere. Response is an
//! impulse exchange along the contact normal.

use super::state::Body;
use crate::consts::COLLISION_REDUCTION_FACTOR;

/// Static overlap (touching counts)
#[inline]
pub fn test_intersect(a: &Body, b: &Body) -> bool {
    a.position.distance(b.position) <= a.radius + b.radius
}

/// Will `moving`, travelling at its velocity this frame, hit `other`?
///
/// One-sided: only `moving`'s velocity is considered.
pub fn test_collision(moving: &Body, other: &Body) -> bool {
    let sum_radii = moving.radius + other.radius;
    let speed = moving.velocity.length();

    // Too slow to close the gap this frame
    let gap = other.position.distance(moving.position) - sum_radii;
    if speed < gap {
        return false;
    }

    // Zero velocity normalizes to zero, which makes `d` zero below
    let n = moving.velocity.normalize_or_zero();
    let c = other.position - moving.position;
    let d = n.dot(c);
    if d <= 0.0 {
        // Behind, or not moving at all
        return false;
    }

    // Squared distance from other's center to the travel ray
    let f = c.length_squared() - d * d;
    let rad_squared = sum_radii * sum_radii;
    if f >= rad_squared {
        return false;
    }

    let t = rad_squared - f;
    if t < 0.0 {
        return false;
    }

    let impact_distance = d - t.sqrt();
    speed >= impact_distance
}

/// Exchange an impulse between two colliding bodies.
///
/// Only velocities change. Coincident centers give a zero normal and
/// leave both bodies untouched.
pub fn perform_collision(s1: &mut Body, s2: &mut Body) {
    let n = (s1.position - s2.position).normalize_or_zero();
    let a1 = s1.velocity.dot(n);
    let a2 = s2.velocity.dot(n);
    let (m1, m2) = (s1.mass, s2.mass);
    let p = (2.0 * (a1 - a2)) / (m1 + m2);
    if !p.is_finite() {
        return;
    }

    s1.velocity -= n * (p * m2 * COLLISION_REDUCTION_FACTOR);
    s2.velocity += n * (p * m1 * COLLISION_REDUCTION_FACTOR);
}

/// Test `moving` against `other` and resolve the hit if there is one
pub fn collide(moving: &mut Body, other: &mut Body) -> bool {
    if test_collision(moving, other) {
        log::debug!("Collision: {} -> {}", moving.id, other.id);
        perform_collision(moving, other);
        true
    } else {
        false
    }
}
