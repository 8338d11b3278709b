//! # ripples3d
//!
//! A rippling grid surface rendered in perspective with hidden line removal,
//! in Q16.16 fixed point, for small displays.
//!
//! - **Height field**: a cosine ripple around a movable oscillator
//! - **Camera**: look-at camera driven by tilt or an automatic orbit
//! - **Visibility**: sight lines ray-marched against the surface inside a world box
//! - **Raster**: dots, lines, stripes or a full grid, cut where the surface hides them
//! - **Board** (feature `badge`): display and buttons of the Disobey 2026 badge
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let mut engine: ripples3d::Engine = ripples3d::Engine::new(ripples3d::Config::default())?;
//! let mut list = ripples3d::DisplayList::<4096>::new();
//!
//! engine.tick(None);
//! engine.draw(&mut list)?;
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod camera;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod height_field;
pub mod modes;
pub mod oscillator;
pub mod pen;
pub mod projector;
pub mod raster;
pub mod sampler;
pub mod scalar;
pub mod scene;
pub mod surface;
pub mod trig;
pub mod vector;
pub mod visibility;
pub mod world_box;

#[cfg(feature = "badge")]
pub mod board;

pub use config::{
    Config,
    ViewpointSource,
};
pub use engine::{
    Engine,
    GRID_LINES,
};
pub use error::{
    ConfigError,
    DisplayListFull,
};
pub use modes::{
    Colorization,
    Command,
    Illumination,
    Modes,
    OscillatorMode,
    Pattern,
    RenderDepth,
    Transparency,
};
pub use pen::{
    Ink,
    Pen,
    PenColor,
};
pub use sampler::TiltSample;
pub use scalar::Scalar;
pub use surface::{
    Canvas,
    DisplayList,
    DrawSurface,
    Primitive,
};
pub use trig::Angle;
pub use vector::{
    Vec2,
    Vec3,
};
