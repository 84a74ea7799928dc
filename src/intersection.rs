use crate::math::Rect;
use crate::scheduler::Placement;
use crate::{
    BoundaryWatcher, Config, Direction, Instruction, IntersectionGeometry, ReleaseTrigger,
    Scheduler, Vehicle, VehicleId,
};

/// A snapshot of a vehicle, as observed by the intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleState {
    pub id: VehicleId,
    /// The area covered by the vehicle.
    pub rect: Rect,
    pub heading: Direction,
    /// The vehicle's length along its heading in m.
    pub length: f64,
    /// The vehicle's nominal cruising speed in m/s.
    pub cruise_speed: f64,
}

impl From<&Vehicle> for VehicleState {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id(),
            rect: *vehicle.rect(),
            heading: vehicle.heading(),
            length: vehicle.length(),
            cruise_speed: vehicle.cruise_vel(),
        }
    }
}

/// An unsignalised intersection which coordinates approaching vehicles
/// by granting each a reserved window in which to cross.
#[derive(Clone, Debug)]
pub struct Intersection {
    /// The crossing zone and approach boundary.
    geometry: IntersectionGeometry,
    /// The reservation scheduler.
    scheduler: Scheduler,
    /// Watches the approach boundary.
    approach: BoundaryWatcher,
    /// Watches the crossing zone. Only ticked when it triggers releases.
    crossing: BoundaryWatcher,
    /// Which boundary releases reservations.
    release_on: ReleaseTrigger,
    /// The speed vehicles resume when leaving the approach boundary, in m/s.
    speed_limit: f64,
}

impl Intersection {
    /// Creates an intersection with no vehicles under its control.
    pub fn new(geometry: IntersectionGeometry, config: &Config) -> Self {
        Self {
            geometry,
            scheduler: Scheduler::new(config),
            approach: BoundaryWatcher::new(),
            crossing: BoundaryWatcher::new(),
            release_on: config.release_on,
            speed_limit: config.speed_limit,
        }
    }

    pub fn geometry(&self) -> &IntersectionGeometry {
        &self.geometry
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Whether the vehicle is inside the approach boundary.
    pub fn controls(&self, vehicle_id: VehicleId) -> bool {
        self.approach.contains(vehicle_id)
    }

    /// Observes the vehicles at time `now`, releasing the reservations of
    /// vehicles which have left and admitting those which have arrived.
    ///
    /// Returns the speed instructions for the vehicles. Departing vehicles are
    /// told to resume the speed limit; arriving vehicles whose requested
    /// window was renegotiated are told the speed which brings them to the
    /// crossing zone as their window opens.
    pub fn on_tick(&mut self, now: f64, vehicles: &[VehicleState]) -> Vec<Instruction> {
        let rects = move || vehicles.iter().map(|v| (v.id, &v.rect));
        let approach = self.approach.tick(rects(), self.geometry.approach_boundary());
        let mut instructions = vec![];

        // Departures are processed first to free capacity for this tick's arrivals
        if self.release_on == ReleaseTrigger::CrossingZone {
            let crossing = self.crossing.tick(rects(), self.geometry.crossing_zone());
            for vehicle_id in crossing.departed {
                self.on_departure(vehicle_id);
            }
        }
        for &vehicle_id in &approach.departed {
            self.on_departure(vehicle_id);
            instructions.push(Instruction::cruise(vehicle_id, self.speed_limit));
        }

        for vehicle_id in approach.arrived {
            let Some(vehicle) = vehicles.iter().find(|v| v.id == vehicle_id) else {
                continue;
            };
            let request = self.scheduler.request(now, vehicle, &self.geometry);
            let (reservation, placement) = self.scheduler.admit(now, &request);
            if placement != Placement::Requested {
                instructions.push(Instruction::arrive_at(
                    vehicle_id,
                    self.geometry.lead_distance(vehicle.heading),
                    reservation.window,
                    now,
                ));
            }
        }

        instructions
    }

    /// Releases the vehicle's reservation, if it holds one.
    pub fn on_departure(&mut self, vehicle_id: VehicleId) {
        self.scheduler.release(vehicle_id);
    }

    /// Drops every record of a vehicle which has been removed from the world.
    pub fn forget(&mut self, vehicle_id: VehicleId) {
        self.approach.forget(vehicle_id);
        self.crossing.forget(vehicle_id);
        self.scheduler.release(vehicle_id);
    }
}
