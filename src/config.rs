//! Runtime configuration.
//!
//! Everything that used to be a build-time variant (colour or ink, capture or
//! interactive, emulator timing) is a field here.

use embedded_graphics::geometry::Size;
use fugit::MillisDurationU32;

use crate::{
    error::ConfigError,
    modes::{
        Colorization,
        Illumination,
        Modes,
        OscillatorMode,
        Pattern,
        RenderDepth,
        Transparency,
    },
    scalar::{
        self,
        Scalar,
        ZERO,
    },
    trig::Angle,
    vector::Vec3,
};

/// Deepest bisection level the visibility probe may be configured for.
pub const MAX_PROBE_DEPTH: u32 = 10;
/// Most bisection steps the terminator search may be configured for.
pub const MAX_TERMINATOR_DEPTH: u32 = 16;

/// Where the camera's view point comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewpointSource {
    /// The smoothed tilt vector.
    Sensor,
    /// A fixed direction, e.g. for recordings.
    Fixed(Vec3),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Half the side of the square the lattice spans.
    pub half_extent: Scalar,
    pub camera_distance: Scalar,
    pub zoom: Scalar,
    /// Phase advance per tick; one turn is `0x1_0000`.
    pub phase_speed: u32,
    /// Right shift applied to the tilt before it accelerates a bouncing oscillator.
    pub inertia: u32,
    /// Right shift of the velocity removed by drag every tick.
    pub lubrication: u32,
    /// Refinement levels of the visibility probe.
    pub probe_depth: u32,
    /// Bisection steps spent locating a terminator.
    pub terminator_depth: u32,
    /// Auto-orbit steps, only applied while the oscillator is anchored.
    pub rot_z_step: Angle,
    pub rot_x_step: Angle,
    pub tick_interval: MillisDurationU32,
    pub render_depth: RenderDepth,
    pub viewpoint: ViewpointSource,
    pub lights: [Vec3; 3],
    pub screen: Size,
    pub modes: Modes,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// The badge panel in landscape, the screen the defaults are tuned for.
pub const SCREEN_SIZE: Size = Size::new(320, 170);

impl Config {
    pub const fn new() -> Self {
        Self {
            half_extent: scalar::PI,
            // 8.75
            camera_distance: Scalar::from_bits(573_440),
            // 1.25
            zoom: Scalar::from_bits(81_920),
            phase_speed: 256,
            inertia: 6,
            lubrication: 6,
            probe_depth: 5,
            terminator_depth: 6,
            rot_z_step: Angle::fraction_of_turn(512),
            rot_x_step: Angle::fraction_of_turn(1024),
            tick_interval: MillisDurationU32::from_ticks(40),
            render_depth: RenderDepth::Color,
            viewpoint: ViewpointSource::Sensor,
            lights: [
                // Overhead, slightly east.
                Vec3::new(scalar::from_int(2), ZERO, scalar::from_int(8)),
                // Low in the south west.
                Vec3::new(scalar::from_int(-6), scalar::from_int(-6), scalar::from_int(3)),
                // Low in the north.
                Vec3::new(ZERO, scalar::from_int(7), scalar::from_int(2)),
            ],
            screen: SCREEN_SIZE,
            modes: Modes {
                pattern: Pattern::Lines,
                colorization: Colorization::Signal,
                transparency: Transparency::Opaque,
                oscillator: OscillatorMode::Anchored,
                illumination: Illumination::Sun,
            },
        }
    }

    #[must_use]
    pub const fn with_half_extent(mut self, half_extent: Scalar) -> Self {
        self.half_extent = half_extent;
        self
    }

    #[must_use]
    pub const fn with_screen(mut self, screen: Size) -> Self {
        self.screen = screen;
        self
    }

    #[must_use]
    pub const fn with_modes(mut self, modes: Modes) -> Self {
        self.modes = modes;
        self
    }

    #[must_use]
    pub const fn with_render_depth(mut self, render_depth: RenderDepth) -> Self {
        self.render_depth = render_depth;
        self
    }

    #[must_use]
    pub const fn with_viewpoint(mut self, viewpoint: ViewpointSource) -> Self {
        self.viewpoint = viewpoint;
        self
    }

    #[must_use]
    pub const fn with_probe_depth(mut self, probe_depth: u32) -> Self {
        self.probe_depth = probe_depth;
        self
    }

    #[must_use]
    pub const fn with_tick_interval(mut self, tick_interval: MillisDurationU32) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Checks the ranges the fixed-point pipeline relies on.
    pub fn validate(&self, grid_lines: usize) -> Result<(), ConfigError> {
        if grid_lines < 2 {
            return Err(ConfigError::GridTooSmall(grid_lines));
        }
        if self.half_extent <= ZERO || self.half_extent > scalar::from_int(16) {
            return Err(ConfigError::HalfExtentOutOfRange);
        }
        if self.camera_distance <= ZERO || self.camera_distance > scalar::from_int(64) {
            return Err(ConfigError::CameraDistanceOutOfRange);
        }
        if self.zoom <= ZERO {
            return Err(ConfigError::ZoomNotPositive);
        }
        if self.probe_depth > MAX_PROBE_DEPTH {
            return Err(ConfigError::ProbeDepthTooLarge(self.probe_depth));
        }
        if self.terminator_depth > MAX_TERMINATOR_DEPTH {
            return Err(ConfigError::TerminatorDepthTooLarge(self.terminator_depth));
        }
        for shift in [self.inertia, self.lubrication] {
            if shift >= 16 {
                return Err(ConfigError::ShiftTooLarge(shift));
            }
        }
        if self.screen.width < 2 || self.screen.height < 2 {
            return Err(ConfigError::ScreenTooSmall(self.screen.width, self.screen.height));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(Config::default().validate(25), Ok(()));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let config = Config::default();
        assert_eq!(config.validate(1), Err(ConfigError::GridTooSmall(1)));
        assert_eq!(
            config.with_half_extent(scalar::from_int(20)).validate(25),
            Err(ConfigError::HalfExtentOutOfRange)
        );
        assert_eq!(
            config.with_probe_depth(11).validate(25),
            Err(ConfigError::ProbeDepthTooLarge(11))
        );
        assert_eq!(
            config.with_screen(Size::new(1, 100)).validate(25),
            Err(ConfigError::ScreenTooSmall(1, 100))
        );
    }

    #[test]
    fn defaults_target_the_landscape_panel() {
        let config = Config::default();
        assert_eq!(config.screen, SCREEN_SIZE);
        assert_eq!(crate::projector::Projector::new(config.screen).center().x, 160);
    }

    #[test]
    fn default_tick_is_forty_milliseconds() {
        assert_eq!(Config::default().tick_interval.to_millis(), 40);
    }
}
