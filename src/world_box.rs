//! The axis-aligned box enclosing every reachable lattice position.

use crate::{
    scalar::{
        ONE,
        Scalar,
    },
    vector::Vec3,
};

/// Headroom above the wave's crest and below its trough, so sight lines
/// clipped to the top or bottom face end clear of the surface.
pub const Z_MARGIN: Scalar = Scalar::from_bits(1 << 14);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl WorldBox {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box over a `[-half_extent, half_extent]²` lattice carrying a unit amplitude wave.
    pub fn around_grid(half_extent: Scalar) -> Self {
        let z = ONE + Z_MARGIN;
        Self {
            min: Vec3::new(-half_extent, -half_extent, -z),
            max: Vec3::new(half_extent, half_extent, z),
        }
    }

    pub fn contains(&self, p: Vec3) -> bool {
        (self.min.x..=self.max.x).contains(&p.x)
            && (self.min.y..=self.max.y).contains(&p.y)
            && (self.min.z..=self.max.z).contains(&p.z)
    }
}

/// Which face planes of the world box a viewer lies beyond.
///
/// `major` means beyond the maximum of an axis, `minor` beyond its minimum.
/// Computed once per viewer per tick and shared by every point tested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Boxing {
    pub x_major: bool,
    pub x_minor: bool,
    pub y_major: bool,
    pub y_minor: bool,
    pub z_major: bool,
    pub z_minor: bool,
}

impl Boxing {
    pub fn classify(viewer: Vec3, world: &WorldBox) -> Self {
        Self {
            x_major: viewer.x > world.max.x,
            x_minor: viewer.x < world.min.x,
            y_major: viewer.y > world.max.y,
            y_minor: viewer.y < world.min.y,
            z_major: viewer.z > world.max.z,
            z_minor: viewer.z < world.min.z,
        }
    }

    /// True when the viewer is inside the box on every axis.
    pub const fn is_inside(&self) -> bool {
        !(self.x_major || self.x_minor || self.y_major || self.y_minor || self.z_major || self.z_minor)
    }
}
