//! Pens and how a point picks one.
//!
//! Colour surfaces get `Rgb565` pens from small `palette` tables; two-level
//! surfaces get ink, with hidden parts drawn dotted.

use embedded_graphics::pixelcolor::{
    BinaryColor,
    PixelColor,
    Rgb565,
    RgbColor,
};
use palette::Srgb;

use crate::{
    modes::{
        Colorization,
        Modes,
        RenderDepth,
    },
    scalar::Scalar,
    visibility::Visibility,
};

/// Two-level ink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ink {
    Solid,
    /// Every other pixel of a line.
    Dotted,
    /// Background.
    Clear,
}

/// What a primitive is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pen {
    Color(Rgb565),
    Ink(Ink),
}

impl Pen {
    /// The pen hidden parts are drawn with in x-ray mode.
    #[must_use]
    pub fn muted(self) -> Self {
        match self {
            Self::Color(c) => Self::Color(Rgb565::new(c.r() >> 2, c.g() >> 2, c.b() >> 2)),
            Self::Ink(Ink::Solid) => Self::Ink(Ink::Dotted),
            Self::Ink(_) => Self::Ink(Ink::Clear),
        }
    }

    pub const fn is_dotted(self) -> bool {
        matches!(self, Self::Ink(Ink::Dotted))
    }
}

/// Pixel colours a drawing surface can realise a [`Pen`] with.
pub trait PenColor: PixelColor {
    fn from_pen(pen: Pen) -> Self;
}

impl PenColor for Rgb565 {
    fn from_pen(pen: Pen) -> Self {
        match pen {
            Pen::Color(c) => c,
            Pen::Ink(Ink::Clear) => Self::BLACK,
            Pen::Ink(_) => Self::WHITE,
        }
    }
}

impl PenColor for BinaryColor {
    fn from_pen(pen: Pen) -> Self {
        match pen {
            // Green carries the most luminance and the most bits.
            Pen::Color(c) => (c.g() >= Rgb565::MAX_G / 2).into(),
            Pen::Ink(Ink::Clear) => Self::Off,
            Pen::Ink(_) => Self::On,
        }
    }
}

// ── Palettes ────────────────────────────────────────────────────────────────

/// Troughs to crests.
const SIGNAL: [Srgb<u8>; 8] = [
    Srgb::new(20, 30, 110),
    Srgb::new(30, 60, 170),
    Srgb::new(30, 110, 210),
    Srgb::new(40, 160, 220),
    Srgb::new(80, 200, 200),
    Srgb::new(150, 225, 170),
    Srgb::new(220, 240, 150),
    Srgb::new(255, 255, 220),
];

/// One band per world unit away from the oscillator.
const DISTANCE: [Srgb<u8>; 6] = [
    Srgb::new(255, 90, 60),
    Srgb::new(255, 170, 40),
    Srgb::new(240, 230, 80),
    Srgb::new(90, 210, 120),
    Srgb::new(60, 160, 230),
    Srgb::new(150, 100, 220),
];

/// Unlit to fully lit.
const SHADOW: [Srgb<u8>; 4] = [
    Srgb::new(40, 40, 70),
    Srgb::new(100, 90, 120),
    Srgb::new(180, 160, 150),
    Srgb::new(255, 240, 200),
];

const fn rgb565(c: Srgb<u8>) -> Rgb565 {
    Rgb565::new(c.red >> 3, c.green >> 2, c.blue >> 3)
}

/// Chooses pens for the current render depth and colorization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stylist {
    depth: RenderDepth,
    colorization: Colorization,
    lights: usize,
}

impl Stylist {
    pub const fn new(depth: RenderDepth, modes: &Modes) -> Self {
        let lights = modes.active_lights();
        // Shadows without a light carry no information.
        let colorization = match modes.colorization {
            Colorization::Shadow if lights == 0 => Colorization::Signal,
            c => c,
        };
        Self {
            depth,
            colorization,
            lights,
        }
    }

    pub const fn colorization(&self) -> Colorization {
        self.colorization
    }

    pub const fn background(&self) -> Pen {
        match self.depth {
            RenderDepth::Color => Pen::Color(Rgb565::BLACK),
            RenderDepth::Monochrome => Pen::Ink(Ink::Clear),
        }
    }

    pub const fn foreground(&self) -> Pen {
        match self.depth {
            RenderDepth::Color => Pen::Color(Rgb565::WHITE),
            RenderDepth::Monochrome => Pen::Ink(Ink::Solid),
        }
    }

    /// Pen for a point at height `z`, `distance` from the oscillator.
    pub fn pen(&self, z: Scalar, distance: Scalar, visibility: Visibility) -> Pen {
        match (self.depth, self.colorization) {
            (_, Colorization::Mono) => self.foreground(),
            (RenderDepth::Monochrome, Colorization::Shadow) => match visibility.lights_seeing(self.lights) {
                0 => Pen::Ink(Ink::Dotted),
                _ => Pen::Ink(Ink::Solid),
            },
            (RenderDepth::Monochrome, _) => Pen::Ink(Ink::Solid),
            (RenderDepth::Color, Colorization::Signal) => Pen::Color(rgb565(SIGNAL[signal_level(z)])),
            (RenderDepth::Color, Colorization::Distance) => {
                let band = (distance.to_bits().max(0) >> 16) as usize % DISTANCE.len();
                Pen::Color(rgb565(DISTANCE[band]))
            }
            (RenderDepth::Color, Colorization::Shadow) => {
                let seen = visibility.lights_seeing(self.lights);
                let level = seen * (SHADOW.len() - 1) / self.lights.max(1);
                Pen::Color(rgb565(SHADOW[level]))
            }
        }
    }
}

/// Index into [`SIGNAL`] for a height in `[-1, 1]`.
fn signal_level(z: Scalar) -> usize {
    let shifted = (i64::from(z.to_bits()) + (1 << 16)).max(0);
    let level = (shifted * SIGNAL.len() as i64) >> 17;
    (level as usize).min(SIGNAL.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        modes::Illumination,
        scalar::{
            ONE,
            ZERO,
            from_int,
        },
    };

    fn modes(colorization: Colorization, illumination: Illumination) -> Modes {
        Modes {
            colorization,
            illumination,
            ..Modes::default()
        }
    }

    #[test]
    fn signal_ramp_spans_the_palette() {
        assert_eq!(signal_level(-ONE), 0);
        assert_eq!(signal_level(ZERO), 4);
        assert_eq!(signal_level(ONE), SIGNAL.len() - 1);
    }

    #[test]
    fn shadow_without_lights_falls_back_to_signal() {
        let stylist = Stylist::new(RenderDepth::Color, &modes(Colorization::Shadow, Illumination::Off));
        assert_eq!(stylist.colorization(), Colorization::Signal);
        let lit = Stylist::new(RenderDepth::Color, &modes(Colorization::Shadow, Illumination::Sun));
        assert_eq!(lit.colorization(), Colorization::Shadow);
    }

    #[test]
    fn shadow_levels_follow_the_lights() {
        let stylist = Stylist::new(RenderDepth::Color, &modes(Colorization::Shadow, Illumination::Studio));
        let dark = stylist.pen(ZERO, ZERO, Visibility::HIDDEN);
        let bright = stylist.pen(ZERO, ZERO, Visibility::EVERYWHERE);
        assert_eq!(dark, Pen::Color(rgb565(SHADOW[0])));
        assert_eq!(bright, Pen::Color(rgb565(SHADOW[3])));
    }

    #[test]
    fn distance_bands_repeat() {
        let stylist = Stylist::new(RenderDepth::Color, &modes(Colorization::Distance, Illumination::Off));
        let near = stylist.pen(ZERO, ZERO, Visibility::HIDDEN);
        let far = stylist.pen(ZERO, from_int(DISTANCE.len() as i32), Visibility::HIDDEN);
        assert_eq!(near, far);
    }

    #[test]
    fn monochrome_uses_ink() {
        let stylist = Stylist::new(RenderDepth::Monochrome, &modes(Colorization::Shadow, Illumination::Sun));
        assert_eq!(stylist.pen(ZERO, ZERO, Visibility::HIDDEN), Pen::Ink(Ink::Dotted));
        assert_eq!(stylist.pen(ZERO, ZERO, Visibility::EVERYWHERE), Pen::Ink(Ink::Solid));
        assert_eq!(stylist.background(), Pen::Ink(Ink::Clear));
        assert_eq!(Pen::Ink(Ink::Solid).muted(), Pen::Ink(Ink::Dotted));
    }

    #[test]
    fn pens_realise_on_both_surfaces() {
        assert_eq!(Rgb565::from_pen(Pen::Ink(Ink::Solid)), Rgb565::WHITE);
        assert_eq!(BinaryColor::from_pen(Pen::Color(Rgb565::WHITE)), BinaryColor::On);
        assert_eq!(BinaryColor::from_pen(Pen::Color(Rgb565::BLACK)), BinaryColor::Off);
    }
}
