//! Film plane to device pixels.

use embedded_graphics::geometry::{
    Point,
    Size,
};

use crate::{
    camera::CameraTransform,
    scalar::{
        self,
        Scalar,
    },
    vector::{
        Vec2,
        Vec3,
    },
};

/// Scales film coordinates by the smaller screen side and centres them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Projector {
    size: Size,
    scale: Scalar,
    center: Vec2,
}

impl Projector {
    pub fn new(size: Size) -> Self {
        let side = size.width.min(size.height);
        Self {
            size,
            scale: scalar::from_int(side as i32),
            center: Vec2::new(
                scalar::from_int(size.width as i32) >> 1,
                scalar::from_int(size.height as i32) >> 1,
            ),
        }
    }

    pub const fn size(&self) -> Size {
        self.size
    }

    /// The pixel the film-plane origin lands on.
    pub fn center(&self) -> Point {
        self.to_screen(Vec2::ZERO)
    }

    /// Device pixel of a film-plane position, rounded to nearest.
    pub fn to_screen(&self, film: Vec2) -> Point {
        let x = self.scale.saturating_mul(film.x).saturating_add(self.center.x);
        let y = self.scale.saturating_mul(film.y).saturating_add(self.center.y);
        Point::new(x.saturating_round().to_num(), y.saturating_round().to_num())
    }

    /// Device pixel of a world point seen through `camera`.
    #[inline]
    pub fn project(&self, camera: &CameraTransform, p: Vec3) -> Point {
        self.to_screen(camera.view(p))
    }
}
