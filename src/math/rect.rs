use super::{Point2d, Vector2d};
use crate::util::Interval;

/// An axis-aligned rectangle.
///
/// Screen coordinates are used throughout: `x` grows to the right
/// and `y` grows downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// The top-left corner.
    pub min: Point2d,
    /// The bottom-right corner.
    pub max: Point2d,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and its size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min: Point2d::new(x, y),
            max: Point2d::new(x + width, y + height),
        }
    }

    /// Creates a rectangle of the given size centred on a point.
    pub fn from_centre(centre: Point2d, width: f64, height: f64) -> Self {
        Self::new(
            centre.x - 0.5 * width,
            centre.y - 0.5 * height,
            width,
            height,
        )
    }

    /// The horizontal extent of the rectangle.
    pub fn x(&self) -> Interval<f64> {
        Interval::new(self.min.x, self.max.x)
    }

    /// The vertical extent of the rectangle.
    pub fn y(&self) -> Interval<f64> {
        Interval::new(self.min.y, self.max.y)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn centre(&self) -> Point2d {
        Point2d::new(
            0.5 * (self.min.x + self.max.x),
            0.5 * (self.min.y + self.max.y),
        )
    }

    /// Returns true if the two rectangles share an area of positive size.
    /// Rectangles which merely touch along an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x().overlaps(&other.x()) && self.y().overlaps(&other.y())
    }

    /// Computes the overlapping area of two rectangles.
    pub fn clip(&self, other: &Rect) -> Option<Rect> {
        let x = self.x().intersection(&other.x())?;
        let y = self.y().intersection(&other.y())?;
        Some(Rect {
            min: Point2d::new(x.min, y.min),
            max: Point2d::new(x.max, y.max),
        })
    }

    /// Grows the rectangle on every side by `factor` times its own size,
    /// so that each dimension becomes `2 * factor + 1` times larger.
    pub fn expand(&self, factor: f64) -> Rect {
        let pad = Vector2d::new(factor * self.width(), factor * self.height());
        Rect {
            min: self.min - pad,
            max: self.max + pad,
        }
    }

    /// Moves the rectangle by the given offset.
    pub fn translate(&self, offset: Vector2d) -> Rect {
        Rect {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn clip_of_crossing_roads() {
        let h = Rect::new(0.0, 475.0, 1000.0, 50.0);
        let v = Rect::new(475.0, 0.0, 50.0, 1000.0);
        assert_eq!(h.clip(&v), Some(Rect::new(475.0, 475.0, 50.0, 50.0)));
    }

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert_eq!(a.clip(&b), None);
    }

    #[test]
    fn expand_scales_each_dimension() {
        let zone = Rect::new(475.0, 475.0, 50.0, 50.0);
        let outer = zone.expand(2.5);
        assert_approx_eq!(outer.width(), 300.0);
        assert_approx_eq!(outer.height(), 300.0);
        assert_eq!(outer.centre(), zone.centre());
    }
}
