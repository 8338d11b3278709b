//! Lattice storage: every per-point quantity the renderer needs.
//!
//! The major lattice has `N × N` points spanning the world square corner to
//! corner. The minor lattice sits on the cell centres, `(N - 1) × (N - 1)`
//! points, and shares the major lattice's storage shape.

use embedded_graphics::geometry::Point;

use crate::{
    camera::CameraTransform,
    height_field,
    pen::{
        Ink,
        Pen,
        Stylist,
    },
    projector::Projector,
    scalar::{
        Scalar,
        ZERO,
    },
    scene::Scene,
    trig::Angle,
    vector::{
        Vec2,
        Vec3,
    },
    visibility::Visibility,
};

/// One lattice point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fuxel {
    pub world: Vec3,
    /// Distance to the oscillator in the xy plane.
    pub distance: Scalar,
    pub visibility: Visibility,
    pub screen: Point,
    pub pen: Pen,
}

impl Fuxel {
    const EMPTY: Self = Self {
        world: Vec3::ZERO,
        distance: ZERO,
        visibility: Visibility::HIDDEN,
        screen: Point::zero(),
        pen: Pen::Ink(Ink::Clear),
    };
}

/// `half · numerator / (lines - 1)`, truncated towards zero so mirrored
/// numerators give bit-exact mirrored coordinates.
fn coordinate(half: Scalar, numerator: i64, lines: usize) -> Scalar {
    let denominator = (lines as i64 - 1).max(1);
    Scalar::from_bits((i64::from(half.to_bits()) * numerator / denominator) as i32)
}

/// Which of the two interleaved lattices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LatticeKind {
    Major,
    Minor,
}

/// A square arena of fuxels, indexed `[x][y]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lattice<const N: usize> {
    cells: [[Fuxel; N]; N],
    lines: usize,
}

impl<const N: usize> Lattice<N> {
    pub fn new(kind: LatticeKind, half_extent: Scalar) -> Self {
        let lines = match kind {
            LatticeKind::Major => N,
            LatticeKind::Minor => N.saturating_sub(1),
        };
        let n = N as i64;
        let axis = |i: usize| {
            let i = i as i64;
            let numerator = match kind {
                LatticeKind::Major => 2 * i - (n - 1),
                LatticeKind::Minor => 2 * i + 2 - n,
            };
            coordinate(half_extent, numerator, N)
        };

        let mut cells = [[Fuxel::EMPTY; N]; N];
        for (i, column) in cells.iter_mut().enumerate().take(lines) {
            let x = axis(i);
            for (j, cell) in column.iter_mut().enumerate().take(lines) {
                cell.world = Vec3::new(x, axis(j), ZERO);
            }
        }
        Self { cells, lines }
    }

    /// Points per axis actually in use.
    pub const fn lines(&self) -> usize {
        self.lines
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Fuxel> {
        if x < self.lines && y < self.lines {
            Some(&self.cells[x][y])
        } else {
            None
        }
    }

    /// Rows of constant x, each running along the y axis.
    pub fn columns(&self) -> impl Iterator<Item = &[Fuxel]> + '_ {
        self.cells[..self.lines].iter().map(|c| &c[..self.lines])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fuxel> + '_ {
        self.columns().flatten()
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Fuxel> + '_ {
        let lines = self.lines;
        self.cells[..lines].iter_mut().flat_map(move |c| c[..lines].iter_mut())
    }

    pub fn update_distances(&mut self, center: Vec2) {
        for f in self.iter_mut() {
            f.distance = (f.world.xy() - center).length();
        }
    }

    pub fn update_heights(&mut self, phase: Angle) {
        for f in self.iter_mut() {
            f.world.z = height_field::elevation(f.distance, phase);
        }
    }

    pub fn update_visibility(&mut self, scene: &Scene) {
        for f in self.iter_mut() {
            f.visibility = scene.classify(f.world);
        }
    }

    pub fn update_screen(&mut self, projector: &Projector, camera: &CameraTransform) {
        for f in self.iter_mut() {
            f.screen = projector.project(camera, f.world);
        }
    }

    pub fn update_pens(&mut self, stylist: &Stylist) {
        for f in self.iter_mut() {
            f.pen = stylist.pen(f.world.z, f.distance, f.visibility);
        }
    }
}

/// Both lattices; the only owner of per-point state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridState<const N: usize> {
    pub major: Lattice<N>,
    pub minor: Lattice<N>,
}

impl<const N: usize> GridState<N> {
    pub fn new(half_extent: Scalar) -> Self {
        Self {
            major: Lattice::new(LatticeKind::Major, half_extent),
            minor: Lattice::new(LatticeKind::Minor, half_extent),
        }
    }

    /// Only the lattices a pattern draws are kept up to date.
    fn each(&mut self, with_minor: bool, mut f: impl FnMut(&mut Lattice<N>)) {
        f(&mut self.major);
        if with_minor {
            f(&mut self.minor);
        }
    }

    pub fn update_distances(&mut self, center: Vec2, with_minor: bool) {
        self.each(with_minor, |l| l.update_distances(center));
    }

    pub fn update_heights(&mut self, phase: Angle, with_minor: bool) {
        self.each(with_minor, |l| l.update_heights(phase));
    }

    pub fn update_visibility(&mut self, scene: &Scene, with_minor: bool) {
        self.each(with_minor, |l| l.update_visibility(scene));
    }

    pub fn update_screen(&mut self, projector: &Projector, camera: &CameraTransform, with_minor: bool) {
        self.each(with_minor, |l| l.update_screen(projector, camera));
    }

    pub fn update_pens(&mut self, stylist: &Stylist, with_minor: bool) {
        self.each(with_minor, |l| l.update_pens(stylist));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        scalar::PI,
        trig::cos_lookup,
    };

    #[test]
    fn coordinates_are_mirror_symmetric() {
        let major = Lattice::<25>::new(LatticeKind::Major, PI);
        let minor = Lattice::<25>::new(LatticeKind::Minor, PI);
        for (lattice, lines) in [(&major, 25), (&minor, 24)] {
            assert_eq!(lattice.lines(), lines);
            for i in 0..lines {
                let a = lattice.get(i, 0).unwrap().world.x;
                let b = lattice.get(lines - 1 - i, 0).unwrap().world.x;
                assert_eq!(a, -b);
            }
        }
        assert_eq!(major.get(0, 0).unwrap().world.x, -PI);
        assert_eq!(major.get(24, 24).unwrap().world.y, PI);
        assert_eq!(major.get(12, 12).unwrap().world.xy(), Vec2::ZERO);
        assert!(minor.get(24, 0).is_none());
    }

    #[test]
    fn minor_points_sit_between_major_points() {
        let major = Lattice::<5>::new(LatticeKind::Major, PI);
        let minor = Lattice::<5>::new(LatticeKind::Minor, PI);
        for i in 0..4 {
            let lo = major.get(i, 0).unwrap().world.x;
            let hi = major.get(i + 1, 0).unwrap().world.x;
            let mid = minor.get(i, 0).unwrap().world.x;
            assert!(lo < mid && mid < hi);
        }
    }

    #[test]
    fn heights_follow_the_distance() {
        let mut grid = GridState::<5>::new(PI);
        let phase = Angle::from_raw(12_345);
        grid.update_distances(Vec2::ZERO, true);
        grid.update_heights(phase, true);
        let centre = grid.major.get(2, 2).unwrap();
        assert_eq!(centre.distance, ZERO);
        assert_eq!(centre.world.z, cos_lookup(phase));
        assert_eq!(grid.major.iter().count(), 25);
        assert_eq!(grid.minor.iter().count(), 16);
    }
}
