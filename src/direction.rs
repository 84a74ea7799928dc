use crate::math::Vector2d;

/// One of the four axis-aligned headings a vehicle may travel in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards the top of the world (negative y).
    North,
    /// Towards the bottom of the world (positive y).
    South,
    /// Towards the right of the world (positive x).
    East,
    /// Towards the left of the world (negative x).
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// The direction pointing the other way along the same axis.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Whether travel in this direction is along the x-axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }

    /// A unit vector in world space.
    pub fn unit(self) -> Vector2d {
        match self {
            Direction::North => Vector2d::new(0.0, -1.0),
            Direction::South => Vector2d::new(0.0, 1.0),
            Direction::East => Vector2d::new(1.0, 0.0),
            Direction::West => Vector2d::new(-1.0, 0.0),
        }
    }

    /// The direction a vehicle requests to cross towards.
    ///
    /// Only straight-through movements are modelled, so the request is
    /// derived from the heading by the fixed opposite mapping.
    pub fn turn_request(self) -> Direction {
        self.opposite()
    }

    /// Whether vehicles requesting these two directions may occupy
    /// the crossing zone at the same time.
    ///
    /// Only straight-through traffic from opposite approaches is compatible.
    pub fn compatible_with(self, other: Direction) -> bool {
        self == other.opposite()
    }
}
