use crate::math::Rect;
use crate::{Direction, Error};

/// The static layout of an intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionGeometry {
    /// The area shared by both roads.
    crossing_zone: Rect,
    /// The area in which vehicles are under the scheduler's control.
    approach_boundary: Rect,
    /// The size of the approach boundary relative to the crossing zone.
    factor: f64,
}

impl IntersectionGeometry {
    /// Builds the geometry of the intersection of two crossing roads.
    ///
    /// # Parameters
    /// * `road_a` - The first road
    /// * `road_b` - The second road; must overlap `road_a`
    /// * `factor` - How far the approach boundary extends past each side of
    ///   the crossing zone, as a multiple of the crossing zone's size
    pub fn build(road_a: &Rect, road_b: &Rect, factor: f64) -> Result<Self, Error> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(Error::InvalidFactor(factor));
        }
        let crossing_zone = road_a
            .clip(road_b)
            .ok_or(Error::DisjointRoads(*road_a, *road_b))?;
        Ok(Self {
            crossing_zone,
            approach_boundary: crossing_zone.expand(factor),
            factor,
        })
    }

    pub fn crossing_zone(&self) -> &Rect {
        &self.crossing_zone
    }

    pub fn approach_boundary(&self) -> &Rect {
        &self.approach_boundary
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// The size of the crossing zone along the axis of travel.
    pub fn extent_along(&self, heading: Direction) -> f64 {
        if heading.is_horizontal() {
            self.crossing_zone.width()
        } else {
            self.crossing_zone.height()
        }
    }

    /// The distance from the approach boundary to the crossing zone
    /// along the axis of travel.
    pub fn lead_distance(&self, heading: Direction) -> f64 {
        self.factor * self.extent_along(heading)
    }
}
