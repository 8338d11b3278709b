//! Rendering and simulation modes, and the commands that cycle them.
//!
//! Every enum cycles through its variants in declaration order and wraps.

/// Which lattice primitives are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pattern {
    /// Every major and minor lattice point as a single pixel.
    Dots,
    /// Major lattice lines running along the y axis.
    #[default]
    Lines,
    /// Major and minor lattice lines along the y axis.
    Stripes,
    /// Major lattice lines along both axes.
    Grid,
}

impl Pattern {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Dots => Self::Lines,
            Self::Lines => Self::Stripes,
            Self::Stripes => Self::Grid,
            Self::Grid => Self::Dots,
        }
    }

    /// Whether the half-cell offset lattice takes part in this pattern.
    pub const fn uses_minor_lattice(self) -> bool {
        matches!(self, Self::Dots | Self::Stripes)
    }
}

/// How a point's pen is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Colorization {
    /// Foreground pen everywhere.
    Mono,
    /// Palette ramp by height.
    #[default]
    Signal,
    /// Palette bands by distance to the oscillator.
    Distance,
    /// Shade by how many lights see the point.
    Shadow,
}

impl Colorization {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Mono => Self::Signal,
            Self::Signal => Self::Distance,
            Self::Distance => Self::Shadow,
            Self::Shadow => Self::Mono,
        }
    }
}

/// Hidden-surface treatment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transparency {
    /// Hidden points and segments are not drawn.
    #[default]
    Opaque,
    /// No hidden-surface removal at all.
    Translucent,
    /// Hidden parts are drawn with a muted pen.
    Xray,
}

impl Transparency {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Opaque => Self::Translucent,
            Self::Translucent => Self::Xray,
            Self::Xray => Self::Opaque,
        }
    }

    /// Whether camera visibility has to be computed each tick.
    pub const fn needs_visibility(self) -> bool {
        !matches!(self, Self::Translucent)
    }
}

/// Motion of the wave's centre.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OscillatorMode {
    /// Held at the origin; the camera orbits on its own.
    #[default]
    Anchored,
    /// Follows the tilt directly.
    Floating,
    /// Rolls around the box like a ball under tilt, with drag.
    Bouncing,
}

impl OscillatorMode {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Anchored => Self::Floating,
            Self::Floating => Self::Bouncing,
            Self::Bouncing => Self::Anchored,
        }
    }

    /// Sensor driven modes take the view point straight from the tilt, without orbiting.
    pub const fn is_sensor_driven(self) -> bool {
        !matches!(self, Self::Anchored)
    }
}

/// Number of active light sources used by [`Colorization::Shadow`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Illumination {
    Off,
    /// One light.
    #[default]
    Sun,
    /// Two lights.
    Sunset,
    /// Three lights.
    Studio,
}

impl Illumination {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Off => Self::Sun,
            Self::Sun => Self::Sunset,
            Self::Sunset => Self::Studio,
            Self::Studio => Self::Off,
        }
    }

    pub const fn light_count(self) -> usize {
        match self {
            Self::Off => 0,
            Self::Sun => 1,
            Self::Sunset => 2,
            Self::Studio => 3,
        }
    }
}

/// Colour capability of the drawing surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderDepth {
    /// Two-level ink, muted parts dotted.
    Monochrome,
    /// Palette colours, muted parts dimmed.
    #[default]
    Color,
}

/// Discrete input from the host, one per button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    CyclePattern,
    CycleColorization,
    CycleTransparency,
    CycleOscillator,
    CycleIllumination,
}

/// The complete mode selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Modes {
    pub pattern: Pattern,
    pub colorization: Colorization,
    pub transparency: Transparency,
    pub oscillator: OscillatorMode,
    pub illumination: Illumination,
}

impl Modes {
    /// Applies a command and returns the resulting selection.
    #[must_use]
    pub const fn apply(self, command: Command) -> Self {
        let mut modes = self;
        match command {
            Command::CyclePattern => modes.pattern = modes.pattern.next(),
            Command::CycleColorization => modes.colorization = modes.colorization.next(),
            Command::CycleTransparency => modes.transparency = modes.transparency.next(),
            Command::CycleOscillator => modes.oscillator = modes.oscillator.next(),
            Command::CycleIllumination => modes.illumination = modes.illumination.next(),
        }
        modes
    }

    /// Lights whose visibility has to be computed each tick.
    pub const fn active_lights(&self) -> usize {
        match self.colorization {
            Colorization::Shadow => self.illumination.light_count(),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_wrap_around() {
        let mut p = Pattern::Dots;
        for _ in 0..4 {
            p = p.next();
        }
        assert_eq!(p, Pattern::Dots);
        assert_eq!(OscillatorMode::Bouncing.next(), OscillatorMode::Anchored);
        assert_eq!(Transparency::Xray.next(), Transparency::Opaque);
        assert_eq!(Illumination::Studio.next(), Illumination::Off);
    }

    #[test]
    fn commands_touch_one_mode_only() {
        let modes = Modes::default();
        let next = modes.apply(Command::CycleOscillator);
        assert_eq!(next.oscillator, OscillatorMode::Floating);
        assert_eq!(next.pattern, modes.pattern);
        assert_eq!(next.colorization, modes.colorization);
    }

    #[test]
    fn lights_only_matter_for_shadow() {
        let mut modes = Modes {
            illumination: Illumination::Studio,
            ..Modes::default()
        };
        assert_eq!(modes.active_lights(), 0);
        modes.colorization = Colorization::Shadow;
        assert_eq!(modes.active_lights(), 3);
    }
}
