//! Turns lattices into pixels and lines.
//!
//! A segment whose ends disagree on visibility is cut where the surface
//! starts hiding it. The cut point is found by bisecting in the xy plane and
//! lifting each midpoint back onto the surface.

use crate::{
    camera::CameraTransform,
    grid::{
        Fuxel,
        GridState,
        Lattice,
    },
    modes::{
        Pattern,
        Transparency,
    },
    pen::{
        Pen,
        Stylist,
    },
    projector::Projector,
    scalar::midpoint,
    scene::Scene,
    surface::Canvas,
    vector::Vec3,
};

/// The last surface points known to be seen and hidden along a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Terminator {
    pub visible: Vec3,
    pub hidden: Vec3,
}

/// Narrows the visible/hidden boundary between two surface points.
///
/// Each step halves the xy gap, so after `steps` steps it is the original
/// length shifted right by `steps`.
pub fn locate_terminator(scene: &Scene, visible: Vec3, hidden: Vec3, steps: u32) -> Terminator {
    let mut t = Terminator { visible, hidden };
    for _ in 0..steps {
        let (mid, _) = scene.surface_point(
            midpoint(t.visible.x, t.hidden.x),
            midpoint(t.visible.y, t.hidden.y),
        );
        if scene.sees(&scene.camera, mid) {
            t.visible = mid;
        } else {
            t.hidden = mid;
        }
    }
    t
}

/// Draws lattice primitives for one frame.
pub struct Raster<'a> {
    pub scene: &'a Scene,
    pub projector: &'a Projector,
    pub camera: &'a CameraTransform,
    pub stylist: Stylist,
    pub transparency: Transparency,
    pub terminator_depth: u32,
}

impl Raster<'_> {
    pub fn dot<C: Canvas>(&self, canvas: &mut C, f: &Fuxel) -> Result<(), C::Error> {
        match (f.visibility.camera(), self.transparency) {
            (true, _) => canvas.set_pen(f.pen),
            (false, Transparency::Xray) => canvas.set_pen(f.pen.muted()),
            (false, _) => return Ok(()),
        }
        canvas.draw_pixel(f.screen)
    }

    /// Pen for a whole segment, styled from the mean height and distance of its ends.
    fn segment_pen(&self, a: &Fuxel, b: &Fuxel) -> Pen {
        self.stylist.pen(
            midpoint(a.world.z, b.world.z),
            midpoint(a.distance, b.distance),
            a.visibility.intersect(b.visibility),
        )
    }

    pub fn segment<C: Canvas>(&self, canvas: &mut C, a: &Fuxel, b: &Fuxel) -> Result<(), C::Error> {
        let xray = self.transparency == Transparency::Xray;
        match (a.visibility.camera(), b.visibility.camera()) {
            (true, true) => {
                canvas.set_pen(self.segment_pen(a, b));
                canvas.draw_line(a.screen, b.screen)
            }
            (false, false) if xray => {
                canvas.set_pen(self.segment_pen(a, b).muted());
                canvas.draw_line(a.screen, b.screen)
            }
            (false, false) => Ok(()),
            (true, false) => self.split(canvas, a, b),
            (false, true) => self.split(canvas, b, a),
        }
    }

    fn split<C: Canvas>(&self, canvas: &mut C, seen: &Fuxel, hidden: &Fuxel) -> Result<(), C::Error> {
        let t = locate_terminator(self.scene, seen.world, hidden.world, self.terminator_depth);
        let cut = self.projector.project(self.camera, t.visible);
        canvas.set_pen(seen.pen);
        canvas.draw_line(seen.screen, cut)?;
        if self.transparency == Transparency::Xray {
            canvas.set_pen(hidden.pen.muted());
            canvas.draw_line(cut, hidden.screen)?;
        }
        Ok(())
    }

    /// Segments between neighbours along y.
    fn along_y<C: Canvas, const N: usize>(&self, canvas: &mut C, lattice: &Lattice<N>) -> Result<(), C::Error> {
        for column in lattice.columns() {
            for pair in column.windows(2) {
                self.segment(canvas, &pair[0], &pair[1])?;
            }
        }
        Ok(())
    }

    /// Segments between neighbours along x.
    fn along_x<C: Canvas, const N: usize>(&self, canvas: &mut C, lattice: &Lattice<N>) -> Result<(), C::Error> {
        for (left, right) in lattice.columns().zip(lattice.columns().skip(1)) {
            for (a, b) in left.iter().zip(right) {
                self.segment(canvas, a, b)?;
            }
        }
        Ok(())
    }

    pub fn pattern<C: Canvas, const N: usize>(
        &self,
        canvas: &mut C,
        pattern: Pattern,
        grid: &GridState<N>,
    ) -> Result<(), C::Error> {
        match pattern {
            Pattern::Dots => {
                for f in grid.major.iter().chain(grid.minor.iter()) {
                    self.dot(canvas, f)?;
                }
                Ok(())
            }
            Pattern::Lines => self.along_y(canvas, &grid.major),
            Pattern::Stripes => {
                self.along_y(canvas, &grid.major)?;
                self.along_y(canvas, &grid.minor)
            }
            Pattern::Grid => {
                self.along_y(canvas, &grid.major)?;
                self.along_x(canvas, &grid.major)
            }
        }
    }
}
