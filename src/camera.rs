//! Look-at camera with perspective projection onto a film plane.
//!
//! The camera always looks at the world origin with +Z as its up hint. Its
//! position comes from a view-point direction scaled to a fixed distance and
//! rotated by two accumulated angles.

use crate::{
    scalar::{
        Scalar,
        ZERO,
    },
    trig::Angle,
    vector::{
        Vec2,
        Vec3,
    },
    visibility::Viewer,
    world_box::WorldBox,
};

/// Offset substituted for x and y when the eye would sit on the vertical axis.
pub const DEGENERACY_EPSILON: Scalar = Scalar::from_bits(1 << 12);

/// Smallest depth divided by in the perspective projection.
pub const NEAR_DEPTH: Scalar = Scalar::from_bits(1 << 8);

/// Rotates around the Z axis.
pub fn rotate_z(v: Vec3, angle: Angle) -> Vec3 {
    let (s, c) = (angle.sin(), angle.cos());
    Vec3::new(v.x * c - v.y * s, v.x * s + v.y * c, v.z)
}

/// Rotates around the X axis.
pub fn rotate_x(v: Vec3, angle: Angle) -> Vec3 {
    let (s, c) = (angle.sin(), angle.cos());
    Vec3::new(v.x, v.y * c - v.z * s, v.y * s + v.z * c)
}

/// A configured camera: orthonormal basis, zoom and the eye's boxing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CameraTransform {
    right: Vec3,
    up: Vec3,
    forward: Vec3,
    zoom: Scalar,
    viewer: Viewer,
}

impl CameraTransform {
    /// Looks from `eye` towards the origin.
    ///
    /// `eye` must not lie on the Z axis; [`configure`] guarantees that.
    pub fn look_at_origin(eye: Vec3, zoom: Scalar, world: &WorldBox) -> Self {
        let forward = (-eye).normalized();
        // forward × Z, taken from the eye directly to keep precision near the pole.
        let right = Vec3::new(-eye.y, eye.x, ZERO).normalized();
        let up = right.cross(forward);
        Self {
            right,
            up,
            forward,
            zoom,
            viewer: Viewer::new(eye, world),
        }
    }

    #[inline]
    pub const fn eye(&self) -> Vec3 {
        self.viewer.position
    }

    /// The eye with its boxing, ready for visibility tests.
    #[inline]
    pub const fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub const fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.right, self.up, self.forward)
    }

    /// Film-plane coordinates of a world point, y growing downwards.
    pub fn view(&self, p: Vec3) -> Vec2 {
        let d = p - self.viewer.position;
        let depth = d.dot(self.forward).max(NEAR_DEPTH);
        let x = d.dot(self.right);
        let y = d.dot(self.up);
        Vec2::new(self.zoom * x / depth, -(self.zoom * y) / depth)
    }
}

/// Builds the camera transform for a view point and two rotation angles.
pub fn configure(
    view_point: Vec3,
    rot_z: Angle,
    rot_x: Angle,
    distance: Scalar,
    zoom: Scalar,
    world: &WorldBox,
) -> CameraTransform {
    let direction = if view_point == Vec3::ZERO {
        Vec3::new(ZERO, ZERO, Scalar::ONE)
    } else {
        view_point
    };
    let scaled = direction.scaled_to(distance);
    let mut eye = rotate_x(rotate_z(scaled, rot_z), rot_x);
    if eye.x == ZERO && eye.y == ZERO {
        eye = Vec3::new(DEGENERACY_EPSILON, DEGENERACY_EPSILON, eye.z);
    }
    CameraTransform::look_at_origin(eye, zoom, world)
}

/// Camera state carried across ticks: distance, zoom and the orbit angles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Camera {
    distance: Scalar,
    zoom: Scalar,
    rot_z: Angle,
    rot_x: Angle,
    transform: CameraTransform,
}

impl Camera {
    pub fn new(distance: Scalar, zoom: Scalar, view_point: Vec3, world: &WorldBox) -> Self {
        Self {
            distance,
            zoom,
            rot_z: Angle::ZERO,
            rot_x: Angle::ZERO,
            transform: configure(view_point, Angle::ZERO, Angle::ZERO, distance, zoom, world),
        }
    }

    /// Advances both orbit accumulators; they wrap modulo one turn.
    pub fn orbit(&mut self, step_z: Angle, step_x: Angle) {
        self.rot_z = self.rot_z.wrapping_add(step_z);
        self.rot_x = self.rot_x.wrapping_add(step_x);
    }

    pub fn reset_orbit(&mut self) {
        self.rot_z = Angle::ZERO;
        self.rot_x = Angle::ZERO;
    }

    pub const fn angles(&self) -> (Angle, Angle) {
        (self.rot_z, self.rot_x)
    }

    /// Rebuilds the transform for this tick.
    pub fn configure(&mut self, view_point: Vec3, world: &WorldBox) -> &CameraTransform {
        self.transform = configure(view_point, self.rot_z, self.rot_x, self.distance, self.zoom, world);
        &self.transform
    }

    pub const fn transform(&self) -> &CameraTransform {
        &self.transform
    }
}
