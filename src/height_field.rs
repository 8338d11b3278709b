//! The rippling surface `z = f(x, y)`.
//!
//! A cosine of the distance to the oscillator, shifted by a phase that walks
//! backwards every tick so rings travel outwards.

use crate::{
    scalar::Scalar,
    trig::{
        Angle,
        cos_lookup,
    },
    vector::{
        Vec2,
        Vec3,
    },
};

/// Anything the visibility probe can measure altitude against.
pub trait Surface {
    /// Signed height of `p` above the surface below it.
    fn altitude(&self, p: Vec3) -> Scalar;
}

/// Phase angle after `tick` ticks: `FULL_TURN - (tick · speed) mod FULL_TURN`.
#[inline]
pub const fn phase_at(tick: u32, speed: u32) -> Angle {
    Angle::ZERO.wrapping_sub(Angle::from_raw(tick.wrapping_mul(speed)))
}

/// Surface height at `distance` from the oscillator, in `[-1, 1]`.
///
/// Half the distance's raw bits are used as an angle, so one wavelength spans
/// two world units.
#[inline]
pub fn elevation(distance: Scalar, phase: Angle) -> Scalar {
    let ripple = Angle::from_raw((distance.to_bits() >> 1) as u32);
    cos_lookup(ripple.wrapping_add(phase))
}

/// The surface as it stands during one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeightField {
    pub center: Vec2,
    pub phase: Angle,
}

impl HeightField {
    pub const fn new(center: Vec2, phase: Angle) -> Self {
        Self { center, phase }
    }

    #[inline]
    pub fn distance_to(&self, x: Scalar, y: Scalar) -> Scalar {
        (Vec2::new(x, y) - self.center).length()
    }

    #[inline]
    pub fn z_at(&self, x: Scalar, y: Scalar) -> Scalar {
        elevation(self.distance_to(x, y), self.phase)
    }
}

impl Surface for HeightField {
    #[inline]
    fn altitude(&self, p: Vec3) -> Scalar {
        p.z - self.z_at(p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        scalar::{
            ONE,
            from_int,
        },
        trig::FULL_TURN,
    };

    #[test]
    fn phase_starts_at_a_full_turn() {
        assert_eq!(phase_at(0, 256), Angle::ZERO);
        assert_eq!(phase_at(1, 256).raw(), FULL_TURN - 256);
    }

    #[test]
    fn elevation_is_bounded() {
        for tick in (0..2_000).step_by(37) {
            for d in 0..200 {
                let z = elevation(Scalar::from_bits(d * 1_171), phase_at(tick, 256));
                assert!(z >= -ONE && z <= ONE);
            }
        }
    }

    #[test]
    fn elevation_is_periodic_in_ticks() {
        let speed = 256;
        let period = FULL_TURN / speed;
        for tick in [0_u32, 3, 77, 1_000] {
            for d in [0, 12_345, 300_000] {
                let d = Scalar::from_bits(d);
                assert_eq!(
                    elevation(d, phase_at(tick, speed)),
                    elevation(d, phase_at(tick + period, speed))
                );
            }
        }
    }

    #[test]
    fn centre_of_the_ripple() {
        let field = HeightField::new(Vec2::ZERO, phase_at(9, 256));
        assert_eq!(field.z_at(Scalar::ZERO, Scalar::ZERO), cos_lookup(phase_at(9, 256)));
        // A crest two units out, where the ripple has turned once.
        let field = HeightField::new(Vec2::ZERO, Angle::ZERO);
        assert_eq!(field.z_at(from_int(2), Scalar::ZERO), ONE);
    }

    #[test]
    fn altitude_is_height_above_surface() {
        let field = HeightField::new(Vec2::ZERO, Angle::ZERO);
        assert_eq!(field.altitude(Vec3::new(Scalar::ZERO, Scalar::ZERO, from_int(3))), from_int(2));
    }
}
