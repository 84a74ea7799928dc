pub use cgmath;
pub use config::{Config, ReleaseTrigger};
pub use direction::Direction;
pub use error::Error;
pub use geometry::IntersectionGeometry;
pub use instruction::Instruction;
pub use intersection::{Intersection, VehicleState};
pub use road::{Orientation, Road};
pub use scheduler::{Placement, Request, Reservation, ReservationTable, Scheduler, SchedulerStats};
pub use simulation::Simulation;
use slotmap::{new_key_type, SlotMap};
pub use slotmap::{Key, KeyData};
pub use util::Interval;
pub use vehicle::{SpeedOverride, Vehicle, VehicleAttributes};
pub use watcher::{BoundaryWatcher, Crossings};

mod config;
#[cfg(feature = "debug")]
mod debug;
mod direction;
mod error;
mod geometry;
mod instruction;
mod intersection;
pub mod math;
mod road;
mod scheduler;
mod simulation;
mod util;
mod vehicle;
mod watcher;

new_key_type! {
    /// Unique ID of a [Vehicle].
    pub struct VehicleId;
}

type VehicleSet = SlotMap<VehicleId, Vehicle>;
