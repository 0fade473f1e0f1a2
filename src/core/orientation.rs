//! Decomposition of a plane normal into leveling angles
//!
//! Two views of the same normal are produced:
//! - spherical: tilt from +Z and direction (azimuth, measured from +Y towards +X)
//! - axis angles: the composite rotation `Ry(direction) · Rz(tilt)` (intrinsic)
//!   re-expressed as intrinsic X→Z→Y Euler angles, keeping the first two
//!
//! The axis-angle pair is what the results display reports as the "X" and "Y"
//! plane rotation. The second value is the Z term of the X-Z-Y sequence.

use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::{Rotation3, Vector3};
use serde::Serialize;
use tracing::debug;

/// Normals with `z` above this are treated as exactly vertical
pub const HORIZONTAL_THRESHOLD: f64 = 1.0 - 1e-10;

/// Distance from ±90° at which the Euler extraction is considered gimbal locked
const GIMBAL_EPSILON: f64 = 1e-7;

/// Angles describing a plane's orientation, all in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Orientation {
    /// Angle between the normal and +Z, in [0, 180]
    pub tilt: f64,

    /// Azimuth of the tilt, in (-180, 180]
    pub direction: f64,

    /// (about X, about Z) from the X-Z-Y Euler extraction
    pub axis_angles: (f64, f64),
}

impl Orientation {
    /// Slope in µm per mm (mm per metre) for each axis angle
    pub fn axis_slopes(&self) -> (f64, f64) {
        (slope(self.axis_angles.0), slope(self.axis_angles.1))
    }
}

/// `1000 · tan(angle)` for an angle in degrees
pub fn slope(angle_deg: f64) -> f64 {
    1000.0 * angle_deg.to_radians().tan()
}

/// Tilt and direction in radians, with the horizontal guard applied
pub fn tilt_direction(normal: &Vector3<f64>) -> (f64, f64) {
    if normal.z > HORIZONTAL_THRESHOLD {
        debug!("Normal is vertical, plane is level");
        return (0.0, 0.0);
    }

    if normal.z < -HORIZONTAL_THRESHOLD {
        // Pointing straight down: azimuth is undefined
        return (PI, 0.0);
    }

    let tilt = normal.z.clamp(-1.0, 1.0).acos();
    let sin_tilt = tilt.sin();
    let direction = (normal.x / sin_tilt).atan2(normal.y / sin_tilt);
    (tilt, direction)
}

/// First two intrinsic X-Z-Y Euler angles (radians) of `Ry(direction) · Rz(tilt)`
pub fn axis_angles(tilt: f64, direction: f64) -> (f64, f64) {
    let rotation = Rotation3::from_axis_angle(&Vector3::y_axis(), direction)
        * Rotation3::from_axis_angle(&Vector3::z_axis(), tilt);
    let m = rotation.matrix();

    // R = Rx(a) · Rz(b) · Ry(c)  =>  R[0,1] = -sin(b)
    let about_z = (-m[(0, 1)]).clamp(-1.0, 1.0).asin();
    let about_x = if (about_z.abs() - FRAC_PI_2).abs() < GIMBAL_EPSILON {
        // c is not observable; take c = 0
        (-m[(1, 2)]).atan2(m[(2, 2)])
    } else {
        m[(2, 1)].atan2(m[(1, 1)])
    };

    (about_x, about_z)
}

/// Decompose a unit normal into tilt, direction and axis angles (degrees)
pub fn decompose(normal: &Vector3<f64>) -> Orientation {
    let (tilt, direction) = tilt_direction(normal);
    let (about_x, about_z) = axis_angles(tilt, direction);

    Orientation {
        tilt: tilt.to_degrees(),
        direction: direction.to_degrees(),
        axis_angles: (about_x.to_degrees(), about_z.to_degrees()),
    }
}
