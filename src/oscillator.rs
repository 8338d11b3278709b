//! The wave's centre and how it moves.

use crate::{
    modes::OscillatorMode,
    scalar::Scalar,
    vector::Vec2,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Oscillator {
    mode: OscillatorMode,
    position: Vec2,
    velocity: Vec2,
    acceleration: Vec2,
    half_extent: Scalar,
    inertia: u32,
    lubrication: u32,
}

impl Oscillator {
    pub const fn new(mode: OscillatorMode, half_extent: Scalar, inertia: u32, lubrication: u32) -> Self {
        Self {
            mode,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            half_extent,
            inertia,
            lubrication,
        }
    }

    pub const fn mode(&self) -> OscillatorMode {
        self.mode
    }

    pub const fn position(&self) -> Vec2 {
        self.position
    }

    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Switches mode and reseeds the motion state at rest in the origin.
    pub fn set_mode(&mut self, mode: OscillatorMode) {
        debug!("oscillator reseeded");
        self.mode = mode;
        self.position = Vec2::ZERO;
        self.velocity = Vec2::ZERO;
        self.acceleration = Vec2::ZERO;
    }

    /// Gives a bouncing oscillator a push.
    pub fn launch(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Moves the oscillator by one tick under `tilt` (in g, world orientation).
    ///
    /// Returns whether the position changed, i.e. whether distances to the
    /// oscillator have to be recomputed.
    pub fn advance(&mut self, tilt: Vec2) -> bool {
        let before = self.position;
        let h = self.half_extent;
        match self.mode {
            OscillatorMode::Anchored => {
                self.position = Vec2::ZERO;
            }
            OscillatorMode::Floating => {
                self.position = (tilt * h).clamp(h);
            }
            OscillatorMode::Bouncing => {
                self.acceleration = tilt >> self.inertia;
                self.velocity = self.velocity + self.acceleration;
                let p = self.position + self.velocity;
                let (x, vx) = bounce(p.x, self.velocity.x, h);
                let (y, vy) = bounce(p.y, self.velocity.y, h);
                self.position = Vec2::new(x, y);
                // Drag applies after the wall, so the flipped velocity decays too.
                let v = Vec2::new(vx, vy);
                self.velocity = v - (v >> self.lubrication);
            }
        }
        self.position != before
    }
}

/// Clamps one axis to `[-h, h]`, reversing the velocity when a wall is hit.
fn bounce(p: Scalar, v: Scalar, h: Scalar) -> (Scalar, Scalar) {
    if p > h {
        (h, -v)
    } else if p < -h {
        (-h, -v)
    } else {
        (p, v)
    }
}
