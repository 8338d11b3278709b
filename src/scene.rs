//! Everything the visibility test needs for one tick, bundled.

use crate::{
    height_field::{
        HeightField,
        elevation,
    },
    scalar::Scalar,
    vector::Vec3,
    visibility::{
        self,
        MAX_LIGHTS,
        Viewer,
        Visibility,
    },
    world_box::WorldBox,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scene {
    pub field: HeightField,
    pub world: WorldBox,
    pub camera: Viewer,
    pub lights: [Viewer; MAX_LIGHTS],
    /// Lights taken into account, the rest are reported as not seeing anything.
    pub active_lights: usize,
    pub probe_depth: u32,
    /// Without hidden-surface removal every point counts as seen by the camera.
    pub camera_test: bool,
}

impl Scene {
    /// The surface point above `(x, y)` and its distance to the oscillator.
    pub fn surface_point(&self, x: Scalar, y: Scalar) -> (Vec3, Scalar) {
        let distance = self.field.distance_to(x, y);
        let z = elevation(distance, self.field.phase);
        (Vec3::new(x, y, z), distance)
    }

    pub fn sees(&self, viewer: &Viewer, p: Vec3) -> bool {
        visibility::is_visible(p, viewer, &self.world, &self.field, self.probe_depth)
    }

    /// Camera and light visibility of a surface point.
    pub fn classify(&self, p: Vec3) -> Visibility {
        let camera = !self.camera_test || self.sees(&self.camera, p);
        let mut v = Visibility::HIDDEN.with_camera(camera);
        for (i, light) in self.lights.iter().enumerate().take(self.active_lights) {
            v = v.with_light(i, self.sees(light, p));
        }
        v
    }
}
