//! The per-tick pipeline and the per-frame renderer, tied together.

use embedded_graphics::geometry::Size;

use crate::{
    camera::{
        Camera,
        CameraTransform,
    },
    config::{
        Config,
        ViewpointSource,
    },
    error::ConfigError,
    grid::GridState,
    height_field::{
        self,
        HeightField,
    },
    modes::{
        Command,
        Modes,
    },
    oscillator::Oscillator,
    pen::{
        Pen,
        Stylist,
    },
    projector::Projector,
    raster::Raster,
    sampler::{
        TiltFilter,
        TiltSample,
    },
    scene::Scene,
    surface::Canvas,
    vector::Vec3,
    visibility::{
        MAX_LIGHTS,
        Viewer,
    },
    world_box::WorldBox,
};

/// Default points per lattice axis.
pub const GRID_LINES: usize = 25;

/// A rippling grid, its camera and everything needed to draw it.
///
/// `N` is the number of major lattice lines per axis.
pub struct Engine<const N: usize = GRID_LINES> {
    config: Config,
    modes: Modes,
    tick: u32,
    filter: TiltFilter,
    view_point: Vec3,
    oscillator: Oscillator,
    camera: Camera,
    world: WorldBox,
    lights: [Viewer; MAX_LIGHTS],
    projector: Projector,
    stylist: Stylist,
    scene: Scene,
    grid: GridState<N>,
}

impl<const N: usize> Engine<N> {
    /// Most primitives one frame can emit: a clear, then every segment of the
    /// full grid split into a seen and an x-rayed line.
    pub const MAX_PRIMITIVES: usize = 1 + 2 * (2 * N * N.saturating_sub(1));

    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate(N)?;

        let modes = config.modes;
        let world = WorldBox::around_grid(config.half_extent);
        let filter = TiltFilter::new();
        let view_point = match config.viewpoint {
            ViewpointSource::Sensor => filter.tilt(),
            ViewpointSource::Fixed(v) => v,
        };
        let camera = Camera::new(config.camera_distance, config.zoom, view_point, &world);
        let lights = config.lights.map(|p| Viewer::new(p, &world));
        let oscillator = Oscillator::new(modes.oscillator, config.half_extent, config.inertia, config.lubrication);

        let mut engine = Self {
            config,
            modes,
            tick: 0,
            filter,
            view_point,
            oscillator,
            camera,
            world,
            lights,
            projector: Projector::new(config.screen),
            stylist: Stylist::new(config.render_depth, &modes),
            scene: Scene {
                field: HeightField::new(oscillator.position(), height_field::phase_at(0, config.phase_speed)),
                world,
                camera: *camera.transform().viewer(),
                lights,
                active_lights: modes.active_lights(),
                probe_depth: config.probe_depth,
                camera_test: modes.transparency.needs_visibility(),
            },
            grid: GridState::new(config.half_extent),
        };
        engine.refresh(true);

        info!(
            "engine ready: {} lines, {}x{} screen",
            N,
            config.screen.width,
            config.screen.height
        );
        Ok(engine)
    }

    /// One simulation step: motion, heights, camera, visibility.
    pub fn tick(&mut self, sample: Option<TiltSample>) {
        self.filter.feed(sample);
        let tilt = self.filter.tilt();
        self.tick = self.tick.wrapping_add(1);

        let moved = self.oscillator.advance(tilt.xy());
        if !self.modes.oscillator.is_sensor_driven() {
            self.camera.orbit(self.config.rot_z_step, self.config.rot_x_step);
        }
        self.view_point = match self.config.viewpoint {
            ViewpointSource::Sensor => tilt,
            ViewpointSource::Fixed(v) => v,
        };
        self.refresh(moved);
    }

    /// Recomputes every per-point quantity for the current tick.
    fn refresh(&mut self, distances: bool) {
        let with_minor = self.modes.pattern.uses_minor_lattice();
        let field = HeightField::new(
            self.oscillator.position(),
            height_field::phase_at(self.tick, self.config.phase_speed),
        );
        if distances {
            // The minor lattice may be drawn later without having moved since.
            self.grid.update_distances(field.center, true);
        }
        self.grid.update_heights(field.phase, with_minor);

        let transform = *self.camera.configure(self.view_point, &self.world);
        self.scene = Scene {
            field,
            world: self.world,
            camera: *transform.viewer(),
            lights: self.lights,
            active_lights: self.modes.active_lights(),
            probe_depth: self.config.probe_depth,
            camera_test: self.modes.transparency.needs_visibility(),
        };
        self.grid.update_visibility(&self.scene, with_minor);
        self.grid.update_screen(&self.projector, &transform, with_minor);
        self.grid.update_pens(&self.stylist, with_minor);
    }

    /// Clears `canvas` and draws the current frame.
    pub fn draw<C: Canvas>(&self, canvas: &mut C) -> Result<(), C::Error> {
        canvas.clear(self.background())?;
        self.render(canvas)
    }

    /// Draws the current frame without clearing first.
    pub fn render<C: Canvas>(&self, canvas: &mut C) -> Result<(), C::Error> {
        let raster = Raster {
            scene: &self.scene,
            projector: &self.projector,
            camera: self.camera.transform(),
            stylist: self.stylist,
            transparency: self.modes.transparency,
            terminator_depth: self.config.terminator_depth,
        };
        raster.pattern(canvas, self.modes.pattern, &self.grid)
    }

    /// Cycles one mode and brings the current frame up to date.
    pub fn apply(&mut self, command: Command) {
        self.modes = self.modes.apply(command);
        self.stylist = Stylist::new(self.config.render_depth, &self.modes);
        let reseed = matches!(command, Command::CycleOscillator);
        if reseed {
            self.oscillator.set_mode(self.modes.oscillator);
            self.camera.reset_orbit();
        }
        debug!("mode changed");
        self.refresh(reseed);
    }

    /// Adapts the projection to a new drawable area.
    pub fn resize(&mut self, size: Size) {
        info!("resized to {}x{}", size.width, size.height);
        self.projector = Projector::new(size);
        let transform = *self.camera.transform();
        self.grid
            .update_screen(&self.projector, &transform, self.modes.pattern.uses_minor_lattice());
    }

    pub const fn background(&self) -> Pen {
        self.stylist.background()
    }

    pub const fn foreground(&self) -> Pen {
        self.stylist.foreground()
    }

    pub const fn modes(&self) -> Modes {
        self.modes
    }

    /// Ticks since construction.
    pub const fn ticks(&self) -> u32 {
        self.tick
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    pub const fn oscillator(&self) -> &Oscillator {
        &self.oscillator
    }

    pub const fn camera(&self) -> &CameraTransform {
        self.camera.transform()
    }

    pub const fn projector(&self) -> &Projector {
        &self.projector
    }

    pub const fn scene(&self) -> &Scene {
        &self.scene
    }

    pub const fn grid(&self) -> &GridState<N> {
        &self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        modes::{
            OscillatorMode,
            Pattern,
            Transparency,
        },
        scalar::ONE,
        surface::DisplayList,
        trig::cos_lookup,
    };

    fn modes(pattern: Pattern, transparency: Transparency) -> Modes {
        Modes {
            pattern,
            transparency,
            ..Modes::default()
        }
    }

    #[test]
    fn rejects_a_degenerate_grid() {
        assert_eq!(
            Engine::<1>::new(Config::default()).err(),
            Some(ConfigError::GridTooSmall(1))
        );
    }

    #[test]
    fn starts_at_tick_zero() {
        let engine = Engine::<5>::new(Config::default()).unwrap();
        assert_eq!(engine.ticks(), 0);
        let centre = engine.grid().major.get(2, 2).unwrap();
        assert_eq!(centre.world.z, ONE);
    }

    #[test]
    fn ticks_advance_the_phase() {
        let mut engine = Engine::<5>::new(Config::default()).unwrap();
        for _ in 0..3 {
            engine.tick(None);
        }
        let phase = height_field::phase_at(3, engine.config().phase_speed);
        assert_eq!(engine.scene().field.phase, phase);
        assert_eq!(engine.grid().major.get(2, 2).unwrap().world.z, cos_lookup(phase));
    }

    #[test]
    fn cycling_the_oscillator_reseeds_it() {
        let config = Config::default().with_modes(Modes {
            oscillator: OscillatorMode::Floating,
            ..Modes::default()
        });
        let mut engine = Engine::<5>::new(config).unwrap();
        engine.tick(Some(TiltSample::new(500, -500, -700)));
        assert_ne!(engine.oscillator().position(), crate::vector::Vec2::ZERO);
        engine.apply(Command::CycleOscillator);
        assert_eq!(engine.oscillator().mode(), OscillatorMode::Bouncing);
        assert_eq!(engine.oscillator().position(), crate::vector::Vec2::ZERO);
    }

    #[test]
    fn translucent_frames_show_every_segment() {
        let config = Config::default().with_modes(modes(Pattern::Grid, Transparency::Translucent));
        let engine = Engine::<5>::new(config).unwrap();
        let mut list = DisplayList::<128>::new();
        engine.draw(&mut list).unwrap();
        // One clear, then 2 · 5 · 4 segments.
        assert_eq!(list.len(), 1 + 40);
    }

    #[test]
    fn dots_cover_both_lattices() {
        let config = Config::default().with_modes(modes(Pattern::Dots, Transparency::Translucent));
        let engine = Engine::<5>::new(config).unwrap();
        let mut list = DisplayList::<64>::new();
        engine.render(&mut list).unwrap();
        assert_eq!(list.len(), 25 + 16);
    }

    #[test]
    fn resizing_recentres_the_projection() {
        let mut engine = Engine::<5>::new(Config::default()).unwrap();
        engine.resize(Size::new(100, 60));
        assert_eq!(engine.projector().size(), Size::new(100, 60));
        assert_eq!(engine.projector().center(), embedded_graphics::geometry::Point::new(50, 30));
    }
}
