#[cfg(feature = "debug")]
use crate::debug::{debug_release, debug_window};
use crate::instruction::MIN_LEAD_TIME;
use crate::util::Interval;
use crate::{Config, Direction, IntersectionGeometry, VehicleId, VehicleState};
use itertools::Itertools;
use smallvec::SmallVec;
pub use table::{Reservation, ReservationTable};

mod table;

/// A vehicle's request to cross the intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Request {
    /// The requesting vehicle.
    pub vehicle_id: VehicleId,
    /// The window in which the vehicle would occupy the crossing zone
    /// at its cruising speed.
    pub window: Interval<f64>,
    /// The direction the vehicle wants to cross towards.
    pub turn: Direction,
}

impl Request {
    /// How long the vehicle needs the crossing zone for, in s.
    pub fn duration(&self) -> f64 {
        self.window.length()
    }
}

/// How an accepted window was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// The requested window was free.
    Requested,
    /// The vehicle speeds up to cross before every conflicting reservation.
    FrontFit,
    /// The vehicle is slotted into a gap between conflicting reservations.
    GapFit,
    /// The vehicle is deferred until after every conflicting reservation.
    Appended,
}

/// Running totals of the scheduler's decisions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SchedulerStats {
    pub requested: usize,
    pub front_fits: usize,
    pub gap_fits: usize,
    pub appended: usize,
    pub released: usize,
    /// The longest delay imposed on a vehicle, in s.
    pub max_deferral: f64,
}

impl SchedulerStats {
    /// The number of vehicles admitted.
    pub fn admitted(&self) -> usize {
        self.requested + self.front_fits + self.gap_fits + self.appended
    }

    fn record(&mut self, placement: Placement, deferral: f64) {
        match placement {
            Placement::Requested => self.requested += 1,
            Placement::FrontFit => self.front_fits += 1,
            Placement::GapFit => self.gap_fits += 1,
            Placement::Appended => self.appended += 1,
        }
        self.max_deferral = f64::max(self.max_deferral, deferral);
    }
}

/// Grants vehicles conflict-free windows in which to cross the intersection.
#[derive(Clone, Debug)]
pub struct Scheduler {
    /// The multiple of a vehicle's length added to its crossing distance.
    crossing_margin: f64,
    /// The buffer around renegotiated windows, as a fraction of their duration.
    buffer_ratio: f64,
    /// Requests are built with at least this speed, in m/s.
    min_speed: f64,
    /// Deferrals longer than this are logged, in s.
    max_deferral: f64,
    /// The accepted reservations.
    table: ReservationTable,
    stats: SchedulerStats,
}

impl Scheduler {
    /// Creates a scheduler with an empty reservation table.
    pub fn new(config: &Config) -> Self {
        Self {
            crossing_margin: config.crossing_margin,
            buffer_ratio: config.buffer_ratio,
            min_speed: config.min_speed,
            max_deferral: config.max_deferral,
            table: ReservationTable::new(),
            stats: SchedulerStats::default(),
        }
    }

    /// The accepted reservations.
    pub fn table(&self) -> &ReservationTable {
        &self.table
    }

    /// Running totals of the decisions made so far.
    pub fn stats(&self) -> &SchedulerStats {
        &self.stats
    }

    /// Builds the request of a vehicle which has just entered the approach boundary.
    ///
    /// The vehicle is assumed to hold its cruising speed until it has cleared
    /// the crossing zone.
    pub fn request(
        &self,
        now: f64,
        vehicle: &VehicleState,
        geometry: &IntersectionGeometry,
    ) -> Request {
        let vel = if vehicle.cruise_speed >= self.min_speed {
            vehicle.cruise_speed
        } else {
            log::warn!(
                "vehicle {:?} requested a crossing at speed {}, clamping to {}",
                vehicle.id,
                vehicle.cruise_speed,
                self.min_speed
            );
            self.min_speed
        };
        let extent = geometry.extent_along(vehicle.heading);
        let start = now + geometry.lead_distance(vehicle.heading) / vel;
        let end = start + (extent + self.crossing_margin * vehicle.length) / vel;
        Request {
            vehicle_id: vehicle.id,
            window: Interval::new(start, end),
            turn: vehicle.heading.turn_request(),
        }
    }

    /// Whether the request collides with a reservation held by another vehicle
    /// travelling in an incompatible direction.
    pub fn conflicting(&self, request: &Request) -> bool {
        if self.table.is_empty() {
            return false;
        }
        self.table
            .iter()
            .filter(|r| r.vehicle_id != request.vehicle_id)
            .any(|r| request.window.reaches(&r.window) && !request.turn.compatible_with(r.turn))
    }

    /// Finds a window for the request which does not conflict with the table.
    ///
    /// The options are tried in order: speeding up to cross ahead of every
    /// conflicting reservation, squeezing into the first gap wide enough,
    /// and finally deferring until after the last conflicting reservation.
    /// The returned window never starts before `now`, and a front fit
    /// always leaves the vehicle some time to reach the crossing zone.
    pub fn resolve(&self, now: f64, request: &Request) -> (Interval<f64>, Placement) {
        let delta = request.duration();
        let buffer = self.buffer_ratio * delta;
        let blocks = self.busy_blocks(request);
        let (first, last) = match (blocks.first(), blocks.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return (request.window, Placement::Requested),
        };

        let front = Interval::new(now, first.min);
        if delta < front.length() && request.window.max < first.midpoint() {
            let end = front.max - buffer;
            let start = end - delta;
            if start > now + MIN_LEAD_TIME {
                return (Interval::new(start, end), Placement::FrontFit);
            }
        }

        for (before, after) in blocks.iter().tuple_windows() {
            let gap = Interval::new(f64::max(before.max, now), after.min);
            if delta < gap.length() {
                let start = gap.min + 0.5 * (gap.length() - delta);
                return (Interval::new(start, start + delta), Placement::GapFit);
            }
        }

        let start = f64::max(last.max, now) + buffer;
        (Interval::new(start, start + delta), Placement::Appended)
    }

    /// Accepts a request into the table, renegotiating its window if it conflicts.
    pub fn admit(&mut self, now: f64, request: &Request) -> (Reservation, Placement) {
        let (window, placement) = if self.conflicting(request) {
            self.resolve(now, request)
        } else {
            (request.window, Placement::Requested)
        };
        let reservation = Reservation {
            vehicle_id: request.vehicle_id,
            turn: request.turn,
            window,
        };
        self.table.insert(reservation);

        let deferral = window.min - request.window.min;
        self.stats.record(placement, deferral);
        if deferral > self.max_deferral {
            log::warn!(
                "vehicle {:?} deferred by {:.1}s to {:?}",
                request.vehicle_id,
                deferral,
                window
            );
        }
        log::debug!(
            "admitted {:?} at {:?} ({:?}, requested {:?})",
            request.vehicle_id,
            window,
            placement,
            request.window
        );
        #[cfg(feature = "debug")]
        debug_window(&format!("{placement:?}"), request.vehicle_id, window);

        (reservation, placement)
    }

    /// Releases the vehicle's reservation. Releasing a vehicle without
    /// a reservation does nothing.
    pub fn release(&mut self, vehicle_id: VehicleId) -> Option<Reservation> {
        let released = self.table.remove(vehicle_id);
        match released {
            Some(_) => {
                self.stats.released += 1;
                #[cfg(feature = "debug")]
                debug_release(vehicle_id);
            }
            None => log::debug!("no reservation to release for {vehicle_id:?}"),
        }
        released
    }

    /// The windows during which the crossing zone is held by vehicles
    /// incompatible with the request, merged so that they are disjoint
    /// and in ascending order.
    fn busy_blocks(&self, request: &Request) -> SmallVec<[Interval<f64>; 8]> {
        let mut blocks: SmallVec<[Interval<f64>; 8]> = SmallVec::new();
        let incompatible = self
            .table
            .iter()
            .filter(|r| r.vehicle_id != request.vehicle_id)
            .filter(|r| !request.turn.compatible_with(r.turn));
        for reservation in incompatible {
            match blocks.last_mut() {
                Some(block) if reservation.window.min <= block.max => {
                    *block = block.hull(&reservation.window);
                }
                _ => blocks.push(reservation.window),
            }
        }
        blocks
    }
}
