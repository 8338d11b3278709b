//! Drawing surfaces the renderer writes to.

use embedded_graphics::{
    Drawable,
    Pixel,
    draw_target::DrawTarget,
    geometry::Point,
    primitives::{
        Line,
        PointsIter,
        Primitive as _,
        PrimitiveStyle,
    },
};
use heapless::Vec;

use crate::{
    error::DisplayListFull,
    pen::{
        Ink,
        Pen,
        PenColor,
    },
};

/// The host's drawing interface: a current pen, pixels and lines.
pub trait Canvas {
    type Error;

    fn set_pen(&mut self, pen: Pen);

    fn draw_pixel(&mut self, at: Point) -> Result<(), Self::Error>;

    fn draw_line(&mut self, from: Point, to: Point) -> Result<(), Self::Error>;

    /// Fills the whole surface with `pen`.
    fn clear(&mut self, pen: Pen) -> Result<(), Self::Error>;
}

/// [`Canvas`] over any `embedded-graphics` draw target.
pub struct DrawSurface<D> {
    target: D,
    pen: Pen,
}

impl<D> DrawSurface<D> {
    pub const fn new(target: D) -> Self {
        Self {
            target,
            pen: Pen::Ink(Ink::Solid),
        }
    }

    pub const fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }
}

impl<D> Canvas for DrawSurface<D>
where
    D: DrawTarget,
    D::Color: PenColor,
{
    type Error = D::Error;

    fn set_pen(&mut self, pen: Pen) {
        self.pen = pen;
    }

    fn draw_pixel(&mut self, at: Point) -> Result<(), Self::Error> {
        Pixel(at, D::Color::from_pen(self.pen)).draw(&mut self.target)
    }

    fn draw_line(&mut self, from: Point, to: Point) -> Result<(), Self::Error> {
        let color = D::Color::from_pen(self.pen);
        let line = Line::new(from, to);
        if self.pen.is_dotted() {
            self.target
                .draw_iter(line.points().step_by(2).map(|p| Pixel(p, color)))
        } else {
            line.into_styled(PrimitiveStyle::with_stroke(color, 1))
                .draw(&mut self.target)
        }
    }

    fn clear(&mut self, pen: Pen) -> Result<(), Self::Error> {
        self.target.clear(D::Color::from_pen(pen))
    }
}

/// One recorded draw call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Primitive {
    Clear(Pen),
    Pixel(Point, Pen),
    Line(Point, Point, Pen),
}

/// A [`Canvas`] that records primitives for later replay.
///
/// Lets a frame be built while the previous one is still on screen, then
/// erased primitive by primitive instead of clearing the whole display.
pub struct DisplayList<const N: usize> {
    items: Vec<Primitive, N>,
    pen: Pen,
}

impl<const N: usize> Default for DisplayList<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> DisplayList<N> {
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            pen: Pen::Ink(Ink::Solid),
        }
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn reset(&mut self) {
        self.items.clear();
    }

    fn record(&mut self, primitive: Primitive) -> Result<(), DisplayListFull> {
        self.items.push(primitive).map_err(|_| DisplayListFull)
    }

    /// Draws every recorded primitive onto `canvas`.
    pub fn replay<C: Canvas>(&self, canvas: &mut C) -> Result<(), C::Error> {
        for item in &self.items {
            match *item {
                Primitive::Clear(pen) => canvas.clear(pen)?,
                Primitive::Pixel(at, pen) => {
                    canvas.set_pen(pen);
                    canvas.draw_pixel(at)?;
                }
                Primitive::Line(from, to, pen) => {
                    canvas.set_pen(pen);
                    canvas.draw_line(from, to)?;
                }
            }
        }
        Ok(())
    }

    /// Paints over every recorded pixel and line with `background`.
    pub fn erase<C: Canvas>(&self, canvas: &mut C, background: Pen) -> Result<(), C::Error> {
        canvas.set_pen(background);
        for item in &self.items {
            match *item {
                Primitive::Clear(_) => {}
                Primitive::Pixel(at, _) => canvas.draw_pixel(at)?,
                Primitive::Line(from, to, _) => canvas.draw_line(from, to)?,
            }
        }
        Ok(())
    }
}

impl<const N: usize> Canvas for DisplayList<N> {
    type Error = DisplayListFull;

    fn set_pen(&mut self, pen: Pen) {
        self.pen = pen;
    }

    fn draw_pixel(&mut self, at: Point) -> Result<(), Self::Error> {
        self.record(Primitive::Pixel(at, self.pen))
    }

    fn draw_line(&mut self, from: Point, to: Point) -> Result<(), Self::Error> {
        self.record(Primitive::Line(from, to, self.pen))
    }

    /// Drops everything recorded so far; it would be painted over anyway.
    fn clear(&mut self, pen: Pen) -> Result<(), Self::Error> {
        self.items.clear();
        self.record(Primitive::Clear(pen))
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::{
        mock_display::MockDisplay,
        pixelcolor::BinaryColor,
    };

    use super::*;

    #[test]
    fn dotted_ink_skips_every_other_pixel() {
        let mut surface = DrawSurface::new(MockDisplay::<BinaryColor>::new());
        surface.set_pen(Pen::Ink(Ink::Dotted));
        surface.draw_line(Point::new(0, 0), Point::new(6, 0)).unwrap();
        surface.target().assert_pattern(&["# # # #"]);
    }

    #[test]
    fn solid_ink_draws_every_pixel() {
        let mut surface = DrawSurface::new(MockDisplay::<BinaryColor>::new());
        surface.set_pen(Pen::Ink(Ink::Solid));
        surface.draw_line(Point::new(0, 0), Point::new(3, 0)).unwrap();
        surface.draw_pixel(Point::new(1, 1)).unwrap();
        surface.target().assert_pattern(&["####", " #  "]);
    }

    #[test]
    fn display_list_records_and_replays() {
        let mut list = DisplayList::<8>::new();
        list.clear(Pen::Ink(Ink::Clear)).unwrap();
        list.set_pen(Pen::Ink(Ink::Solid));
        list.draw_line(Point::new(0, 0), Point::new(2, 0)).unwrap();
        list.draw_pixel(Point::new(0, 2)).unwrap();
        assert_eq!(list.len(), 3);

        let mut display = MockDisplay::<BinaryColor>::new();
        display.set_allow_overdraw(true);
        let mut surface = DrawSurface::new(display);
        list.replay(&mut surface).unwrap();
        assert_eq!(surface.target().get_pixel(Point::new(1, 0)), Some(BinaryColor::On));
        assert_eq!(surface.target().get_pixel(Point::new(0, 2)), Some(BinaryColor::On));
        assert_eq!(surface.target().get_pixel(Point::new(1, 1)), Some(BinaryColor::Off));

        list.erase(&mut surface, Pen::Ink(Ink::Clear)).unwrap();
        assert_eq!(surface.target().get_pixel(Point::new(1, 0)), Some(BinaryColor::Off));
    }

    #[test]
    fn display_list_reports_overflow() {
        let mut list = DisplayList::<1>::new();
        list.draw_pixel(Point::zero()).unwrap();
        assert_eq!(list.draw_pixel(Point::zero()), Err(DisplayListFull));
    }
}
