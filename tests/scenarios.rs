//! End-to-end behaviour of the engine through its public API.

use embedded_graphics::{
    geometry::{
        Point,
        Size,
    },
    mock_display::MockDisplay,
    pixelcolor::Rgb565,
};
use ripples3d::{
    Command,
    Config,
    DisplayList,
    DrawSurface,
    Engine,
    GRID_LINES,
    Modes,
    OscillatorMode,
    Pattern,
    Primitive,
    Scalar,
    Transparency,
    Vec2,
    Vec3,
    ViewpointSource,
    height_field,
    oscillator::Oscillator,
    scalar::{
        self,
        PI,
    },
    trig::cos_lookup,
};

fn translucent(pattern: Pattern) -> Modes {
    Modes {
        pattern,
        transparency: Transparency::Translucent,
        ..Modes::default()
    }
}

#[test]
fn five_by_five_grid_is_radially_symmetric() {
    let engine = Engine::<5>::new(Config::default()).unwrap();
    let major = &engine.grid().major;
    for i in 0..5 {
        for j in 0..5 {
            let p = major.get(i, j).unwrap();
            for q in [
                major.get(4 - i, j).unwrap(),
                major.get(i, 4 - j).unwrap(),
                major.get(4 - i, 4 - j).unwrap(),
                major.get(j, i).unwrap(),
            ] {
                assert_eq!(p.distance, q.distance, "distance at ({i}, {j})");
                assert_eq!(p.world.z, q.world.z, "height at ({i}, {j})");
            }
        }
    }
    let corner = major.get(0, 0).unwrap();
    assert_eq!(corner.world.xy(), Vec2::new(-PI, -PI));
}

#[test]
fn centre_follows_the_phase() {
    let mut engine = Engine::<5>::new(Config::default()).unwrap();
    for tick in 1..=300_u32 {
        engine.tick(None);
        let phase = height_field::phase_at(tick, engine.config().phase_speed);
        let centre = engine.grid().major.get(2, 2).unwrap();
        assert_eq!(centre.world.z, cos_lookup(phase), "tick {tick}");
    }
    assert_eq!(engine.ticks(), 300);
}

#[test]
fn bouncing_oscillator_settles() {
    let mut osc = Oscillator::new(OscillatorMode::Bouncing, PI, 6, 6);
    osc.launch(Vec2::new(Scalar::from_bits(3_072), Scalar::from_bits(-1_536)));
    for _ in 0..200 {
        osc.advance(Vec2::ZERO);
        let p = osc.position();
        assert!(p.x.abs() <= PI && p.y.abs() <= PI);
    }
    let v = osc.velocity();
    let one_percent = Scalar::from_bits(655);
    assert!(v.x.abs() < one_percent && v.y.abs() < one_percent);
}

#[test]
fn origin_projects_to_the_screen_centre() {
    for screen in [Size::new(144, 168), Size::new(320, 170)] {
        let config = Config::default()
            .with_screen(screen)
            .with_viewpoint(ViewpointSource::Fixed(Vec3::new(
                scalar::ZERO,
                -scalar::ONE,
                scalar::ONE,
            )));
        let engine = Engine::<5>::new(config).unwrap();
        let expected = Point::new(screen.width as i32 / 2, screen.height as i32 / 2);
        assert_eq!(engine.projector().project(engine.camera(), Vec3::ZERO), expected);
    }
}

#[test]
fn frames_render_onto_a_display() {
    let config = Config::default()
        .with_screen(Size::new(64, 64))
        .with_modes(translucent(Pattern::Grid));
    let mut engine = Engine::<5>::new(config).unwrap();
    engine.tick(None);

    let mut list = DisplayList::<64>::new();
    engine.draw(&mut list).unwrap();
    assert_eq!(list.primitives()[0], Primitive::Clear(engine.background()));
    assert_eq!(list.len(), 1 + 40);
    for primitive in &list.primitives()[1..] {
        assert!(
            matches!(primitive, Primitive::Line(..)),
            "grid frames only contain lines, got {primitive:?}"
        );
    }

    // Corners nearest to the camera may fall outside a small screen.
    let mut display = MockDisplay::<Rgb565>::new();
    display.set_allow_overdraw(true);
    display.set_allow_out_of_bounds_drawing(true);
    let mut surface = DrawSurface::new(display);
    list.replay(&mut surface).unwrap();
    let centre = surface.target().get_pixel(Point::new(32, 32));
    assert!(centre.is_some());
}

#[test]
fn opaque_frames_hide_part_of_the_surface() {
    let config = Config::default()
        .with_screen(Size::new(64, 64))
        .with_viewpoint(ViewpointSource::Fixed(Vec3::new(
            scalar::ZERO,
            -scalar::from_int(4),
            scalar::ONE,
        )))
        .with_modes(Modes {
            pattern: Pattern::Dots,
            ..Modes::default()
        });
    let engine = Engine::<9>::new(config).unwrap();
    let hidden = engine
        .grid()
        .major
        .iter()
        .filter(|f| !f.visibility.camera())
        .count();
    assert!(hidden > 0, "a low camera sees behind every crest");

    let mut list = DisplayList::<256>::new();
    engine.render(&mut list).unwrap();
    let drawn_major = 81 - hidden;
    assert!(list.len() >= drawn_major && list.len() < 81 + 64);
}

#[test]
fn commands_cycle_modes() {
    let mut engine = Engine::<5>::new(Config::default()).unwrap();
    let before = engine.modes();
    engine.apply(Command::CyclePattern);
    assert_eq!(engine.modes().pattern, before.pattern.next());
    engine.apply(Command::CycleTransparency);
    assert_eq!(engine.modes().transparency, Transparency::Translucent);
    engine.apply(Command::CycleOscillator);
    assert_eq!(engine.oscillator().mode(), OscillatorMode::Floating);

    let mut list = DisplayList::<256>::new();
    engine.draw(&mut list).unwrap();
    assert!(list.len() > 1);
    assert_ne!(engine.foreground(), engine.background());
}

#[test]
fn worst_case_frame_fits_its_budget() {
    assert_eq!(Engine::<GRID_LINES>::MAX_PRIMITIVES, 2401);

    let config = Config::default()
        .with_viewpoint(ViewpointSource::Fixed(Vec3::new(
            scalar::ZERO,
            -scalar::from_int(4),
            scalar::ONE,
        )))
        .with_modes(Modes {
            pattern: Pattern::Grid,
            transparency: Transparency::Xray,
            ..Modes::default()
        });
    let mut engine = Engine::<GRID_LINES>::new(config).unwrap();
    let mut list = DisplayList::<{ Engine::<GRID_LINES>::MAX_PRIMITIVES }>::new();
    for _ in 0..8 {
        engine.tick(None);
        list.reset();
        engine.draw(&mut list).unwrap();
        // X-ray draws every segment, and at least one is cut in two.
        assert!(list.len() > 1 + 2 * GRID_LINES * (GRID_LINES - 1));
    }
}
