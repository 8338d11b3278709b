//! Hidden-surface test by ray marching against the height field.
//!
//! The sight line from a point towards a viewer is clipped to the world box,
//! then sampled at ever finer steps. A sign change of the altitude along the
//! line means the surface crosses it and the point is occluded.

use crate::{
    height_field::Surface,
    scalar::{
        self,
        ONE,
        Scalar,
        ZERO,
    },
    vector::Vec3,
    world_box::{
        Boxing,
        WorldBox,
    },
};

/// Clip fractions at or below this leave the point touching the box wall it is seen through.
pub const CLIP_EPSILON: Scalar = Scalar::from_bits(1 << 10);

/// Maximum number of lights tracked per point.
pub const MAX_LIGHTS: usize = 3;

const CAMERA_BIT: u8 = 1;

/// One bit per eye: the camera plus up to [`MAX_LIGHTS`] lights.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Visibility(u8);

impl Visibility {
    pub const HIDDEN: Self = Self(0);
    /// Seen by the camera and by every light.
    pub const EVERYWHERE: Self = Self(0b1111);

    #[inline]
    pub const fn camera(self) -> bool {
        self.0 & CAMERA_BIT != 0
    }

    #[inline]
    pub const fn light(self, index: usize) -> bool {
        self.0 & light_bit(index) != 0
    }

    #[inline]
    #[must_use]
    pub const fn with_camera(self, visible: bool) -> Self {
        if visible {
            Self(self.0 | CAMERA_BIT)
        } else {
            Self(self.0 & !CAMERA_BIT)
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_light(self, index: usize, visible: bool) -> Self {
        if visible {
            Self(self.0 | light_bit(index))
        } else {
            Self(self.0 & !light_bit(index))
        }
    }

    /// How many of the first `active` lights see the point.
    pub const fn lights_seeing(self, active: usize) -> usize {
        let mut count = 0;
        let mut i = 0;
        while i < active && i < MAX_LIGHTS {
            if self.light(i) {
                count += 1;
            }
            i += 1;
        }
        count
    }

    /// Bits set in both.
    #[inline]
    #[must_use]
    pub const fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }
}

const fn light_bit(index: usize) -> u8 {
    CAMERA_BIT << (1 + index)
}

/// A position sight lines are tested towards, with its boxing cached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewer {
    pub position: Vec3,
    pub boxing: Boxing,
}

impl Viewer {
    pub fn new(position: Vec3, world: &WorldBox) -> Self {
        Self {
            position,
            boxing: Boxing::classify(position, world),
        }
    }
}

/// Fraction of the point→viewer segment that lies inside the box.
///
/// Only axes the viewer lies beyond constrain it; with none the whole
/// segment counts.
pub fn clip_fraction(point: Vec3, viewer: &Viewer, world: &WorldBox) -> Scalar {
    let d = viewer.position - point;
    let b = &viewer.boxing;
    let mut k = ONE;

    let mut constrain = |plane: Scalar, from: Scalar, delta: Scalar| {
        let axis_k = scalar::div_or_saturate(plane - from, delta);
        k = k.min(axis_k.max(ZERO));
    };

    if b.x_major {
        constrain(world.max.x, point.x, d.x);
    } else if b.x_minor {
        constrain(world.min.x, point.x, d.x);
    }
    if b.y_major {
        constrain(world.max.y, point.y, d.y);
    } else if b.y_minor {
        constrain(world.min.y, point.y, d.y);
    }
    if b.z_major {
        constrain(world.max.z, point.z, d.z);
    } else if b.z_minor {
        constrain(world.min.z, point.z, d.z);
    }
    k
}

/// Whether `point` can be seen from `viewer` past `surface`.
///
/// Level 0 samples the far end of the clipped segment; each further level
/// halves the step and samples the new midpoints, up to `max_depth` levels.
/// Thin slivers between samples can be missed.
pub fn is_visible<S: Surface>(
    point: Vec3,
    viewer: &Viewer,
    world: &WorldBox,
    surface: &S,
    max_depth: u32,
) -> bool {
    let k = clip_fraction(point, viewer, world);
    if k <= CLIP_EPSILON {
        return true;
    }

    let segment = (viewer.position - point) * k;
    let mut above = false;
    let mut below = false;

    for level in 0..=max_depth {
        let step = segment >> level;
        let samples = 1_u32 << level.saturating_sub(1);
        // Level 0 has the single sample at the far end; afterwards only odd multiples are new.
        let (mut probe, stride) = if level == 0 {
            (point + segment, step)
        } else {
            (point + step, step + step)
        };
        for _ in 0..samples {
            let altitude = surface.altitude(probe);
            above |= altitude > ZERO;
            below |= altitude < ZERO;
            if above && below {
                return false;
            }
            probe = probe + stride;
        }
    }
    true
}
