/*!
Poses and frame composition shared by the path model and the passenger code.

A pose is a world position plus a yaw (`orientation`, radians about +Z). Maps are Z-up:
the ground plane is XY.

Two frames matter for transports:
- world frame: where the map places entities.
- transport-local frame: a passenger's seat, relative to the transport's pose.

`Pose::to_world` applies rotation-then-translation (the transport pose acting on a local
offset), `Pose::to_local` is its exact inverse. Orientations are always normalized into
`[0, 2π)`.
*/

use crate::constants::DIST_EPS;
use nalgebra as na;
use std::f32::consts::TAU;

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Iso = na::Isometry3<f32>;

/// Position + yaw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    /// Yaw about +Z in radians, normalized into `[0, 2π)`.
    pub orientation: f32,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            orientation: 0.0,
        }
    }
}

impl Pose {
    #[inline]
    pub fn new(x: f32, y: f32, z: f32, orientation: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            orientation: normalize_orientation(orientation),
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.position.y
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.position.z
    }

    /// Convert to nalgebra `Isometry3` (yaw-only rotation about +Z).
    #[inline]
    pub fn iso(&self) -> Iso {
        Iso::new(self.position, Vec3::z() * self.orientation)
    }

    /// Express a pose given in this pose's local frame in world coordinates.
    #[inline]
    pub fn to_world(&self, local: &Pose) -> Pose {
        let p = self.iso() * na::Point3::from(local.position);
        Pose {
            position: p.coords,
            orientation: normalize_orientation(self.orientation + local.orientation),
        }
    }

    /// Express a world pose in this pose's local frame.
    #[inline]
    pub fn to_local(&self, world: &Pose) -> Pose {
        let p = self
            .iso()
            .inverse_transform_point(&na::Point3::from(world.position));
        Pose {
            position: p.coords,
            orientation: normalize_orientation(world.orientation - self.orientation),
        }
    }

    /// Approximate equality for positions (per-axis) and orientation.
    pub fn approx_eq(&self, other: &Pose, eps: f32) -> bool {
        (self.position - other.position).amax() <= eps
            && angle_distance(self.orientation, other.orientation) <= eps
    }
}

/// Wrap an angle into `[0, 2π)`.
#[inline]
pub fn normalize_orientation(o: f32) -> f32 {
    if !o.is_finite() {
        return 0.0;
    }
    let wrapped = o.rem_euclid(TAU);
    // rem_euclid can return TAU itself for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Shortest absolute angular distance between two yaws.
#[inline]
pub fn angle_distance(a: f32, b: f32) -> f32 {
    let d = normalize_orientation(a - b);
    d.min(TAU - d)
}

/// Facing yaw for a spline tangent.
///
/// Transport models face backwards along the path tangent, so the yaw is taken from the
/// negated planar direction. Returns `None` when the planar tangent is degenerate.
#[inline]
pub fn facing_from_tangent(dir: &Vec3) -> Option<f32> {
    if dir.x * dir.x + dir.y * dir.y <= DIST_EPS * DIST_EPS {
        return None;
    }
    Some(normalize_orientation((-dir.y).atan2(-dir.x)))
}
