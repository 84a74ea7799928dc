use crate::math::{Point2d, Rect};
use crate::Direction;

/// The orientation of a road.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A straight two-way road spanning the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Road {
    /// The area covered by the road.
    rect: Rect,
    orientation: Orientation,
}

impl Road {
    /// Creates a road crossing the whole world.
    ///
    /// # Parameters
    /// * `orientation` - Whether the road runs horizontally or vertically
    /// * `location` - The position of the road's centre line across the world,
    ///   as a fraction of the world's height or width
    /// * `width` - The width of the road in m
    /// * `world` - The extents of the world
    pub fn new(orientation: Orientation, location: f64, width: f64, world: &Rect) -> Self {
        let rect = match orientation {
            Orientation::Horizontal => {
                let y = world.min.y + location * world.height();
                Rect::new(world.min.x, y - 0.5 * width, world.width(), width)
            }
            Orientation::Vertical => {
                let x = world.min.x + location * world.width();
                Rect::new(x - 0.5 * width, world.min.y, width, world.height())
            }
        };
        Self { rect, orientation }
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The directions vehicles may travel along the road.
    pub fn directions(&self) -> [Direction; 2] {
        match self.orientation {
            Orientation::Horizontal => [Direction::East, Direction::West],
            Orientation::Vertical => [Direction::South, Direction::North],
        }
    }

    /// The point on the road's starting edge at which the rear of a new
    /// vehicle travelling along `heading` is placed.
    ///
    /// Traffic keeps to the right, with a quarter of the spare road width
    /// between each lane and the road's edge.
    pub fn spawn_point(&self, heading: Direction, vehicle_width: f64) -> Point2d {
        let r = &self.rect;
        let buffer = 0.25 * f64::max(self.lane_space() - 2.0 * vehicle_width, 0.0);
        let half = 0.5 * vehicle_width;
        match heading {
            Direction::East => Point2d::new(r.min.x, r.max.y - buffer - half),
            Direction::West => Point2d::new(r.max.x, r.min.y + buffer + half),
            Direction::South => Point2d::new(r.min.x + buffer + half, r.min.y),
            Direction::North => Point2d::new(r.max.x - buffer - half, r.max.y),
        }
    }

    /// The width of the road across its direction of travel.
    fn lane_space(&self) -> f64 {
        match self.orientation {
            Orientation::Horizontal => self.rect.height(),
            Orientation::Vertical => self.rect.width(),
        }
    }
}
