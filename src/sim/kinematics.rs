//! Per-entity integration steps
//!
//! Rotation and position integrate one frame's worth of axial and linear
//! velocity. There is no drag anywhere: thrust accumulates until an impact
//! changes it.

use super::state::{Movable, Ship};
use crate::consts::*;
use crate::{Vector3, to_radian};

/// Turn the ship's control holds into yaw rate and thrust
pub fn update_controls(ship: &mut Ship) {
    let yaw = if ship.turning_left {
        to_radian(SHIP_TURN_DEGREES)
    } else if ship.turning_right {
        -to_radian(SHIP_TURN_DEGREES)
    } else {
        0.0
    };
    ship.body.velocity_axial.z = yaw;

    if ship.acceleration {
        let heading = ship.body.rotation.z;
        let thrust = Vector3::new(heading.cos(), heading.sin(), 0.0) * SHIP_ACCELERATION_SPEED;
        ship.body.velocity += thrust;
    }
}

/// `rotation += velocity_axial`
#[inline]
pub fn update_rotation<T: Movable + ?Sized>(entity: &mut T) {
    let body = entity.body_mut();
    body.rotation += body.velocity_axial;
}

/// `position += velocity`
#[inline]
pub fn update_position<T: Movable + ?Sized>(entity: &mut T) {
    let body = entity.body_mut();
    body.position += body.velocity;
}
