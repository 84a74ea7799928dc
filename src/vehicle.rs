use self::overrides::OverrideQueue;
pub use self::overrides::SpeedOverride;
use crate::math::{Point2d, Rect};
use crate::{Direction, Instruction, VehicleId};

mod overrides;

/// A simulated vehicle.
#[derive(Clone, Debug)]
pub struct Vehicle {
    /// The vehicle's ID
    pub(crate) id: VehicleId,
    /// The area covered by the vehicle in world space.
    rect: Rect,
    /// The direction of travel.
    heading: Direction,
    /// The vehicle's length along its heading, in m.
    length: f64,
    /// The speed the vehicle travels at when not instructed otherwise, in m/s.
    cruise_vel: f64,
    /// The speed used during the most recent integration, in m/s.
    vel: f64,
    /// Pending speed instructions from the intersection.
    overrides: OverrideQueue,
}

/// The attributes of a simulated vehicle.
#[derive(Clone, Copy, Debug)]
pub struct VehicleAttributes {
    /// The vehicle length in m.
    pub length: f64,
    /// The vehicle width in m.
    pub width: f64,
    /// The nominal cruising speed in m/s.
    pub cruise_speed: f64,
}

impl Vehicle {
    /// Creates a new vehicle whose rear is at `rear` and travels along `heading`.
    pub(crate) fn new(
        id: VehicleId,
        attributes: &VehicleAttributes,
        heading: Direction,
        rear: Point2d,
    ) -> Self {
        let (w, h) = if heading.is_horizontal() {
            (attributes.length, attributes.width)
        } else {
            (attributes.width, attributes.length)
        };
        let centre = rear + heading.unit() * (0.5 * attributes.length);
        Self {
            id,
            rect: Rect::from_centre(centre, w, h),
            heading,
            length: attributes.length,
            cruise_vel: attributes.cruise_speed,
            vel: attributes.cruise_speed,
            overrides: OverrideQueue::default(),
        }
    }

    /// Gets the vehicle's ID.
    pub fn id(&self) -> VehicleId {
        self.id
    }

    /// The area covered by the vehicle.
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    /// The coordinates in world space of the centre of the vehicle.
    pub fn position(&self) -> Point2d {
        self.rect.centre()
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// The vehicle's length in m.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// The vehicle's nominal cruising speed in m/s.
    pub fn cruise_vel(&self) -> f64 {
        self.cruise_vel
    }

    /// The speed the vehicle moved at during the last step, in m/s.
    pub fn vel(&self) -> f64 {
        self.vel
    }

    /// The pending speed overrides, the active one first.
    pub fn speed_overrides(&self) -> impl Iterator<Item = &SpeedOverride> {
        self.overrides.iter()
    }

    /// Sets the nominal cruising speed.
    pub(crate) fn set_cruise_vel(&mut self, vel: f64) {
        self.cruise_vel = vel;
    }

    /// Applies an instruction from the intersection controller.
    ///
    /// Timed instructions are queued behind any pending override;
    /// untimed ones replace the cruising speed and drop all overrides.
    pub(crate) fn apply_instruction(&mut self, instruction: &Instruction) {
        match instruction.effective_until {
            Some(until) => self.overrides.push(SpeedOverride {
                speed: instruction.target_speed,
                until,
            }),
            None => {
                self.overrides.clear();
                self.cruise_vel += instruction.target_speed - self.cruise_vel;
            }
        }
    }

    /// The speed the vehicle should travel at, at time `now`.
    /// Discards any overrides which have expired.
    pub(crate) fn effective_vel(&mut self, now: f64) -> f64 {
        self.overrides
            .active(now)
            .map_or(self.cruise_vel, |o| o.speed)
    }

    /// Moves the vehicle along its heading.
    ///
    /// # Parameters
    /// * `now` - The simulation time at the start of the step, in s
    /// * `dt` - The time step in s
    pub(crate) fn integrate(&mut self, now: f64, dt: f64) {
        self.vel = self.effective_vel(now);
        self.rect = self.rect.translate(self.heading.unit() * (self.vel * dt));
    }

    /// Whether the vehicle has fully left `world` through the edge it was driving towards.
    pub(crate) fn has_exited(&self, world: &Rect) -> bool {
        match self.heading {
            Direction::East => self.rect.min.x >= world.max.x,
            Direction::West => self.rect.max.x <= world.min.x,
            Direction::South => self.rect.min.y >= world.max.y,
            Direction::North => self.rect.max.y <= world.min.y,
        }
    }
}
