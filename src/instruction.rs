use crate::util::Interval;
use crate::VehicleId;

/// The shortest lead time used when converting a window into a speed, in s.
pub(crate) const MIN_LEAD_TIME: f64 = 1e-3; // s

/// A speed instruction sent from the intersection to a vehicle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Instruction {
    /// The vehicle to instruct.
    pub vehicle_id: VehicleId,
    /// The speed to adopt in m/s.
    pub target_speed: f64,
    /// The simulation time at which the instruction lapses.
    /// `None` replaces the vehicle's cruising speed instead.
    pub effective_until: Option<f64>,
}

impl Instruction {
    /// Instructs a vehicle to cover `lead_distance` at a constant speed so that
    /// it reaches the crossing zone exactly when `window` opens.
    pub fn arrive_at(vehicle_id: VehicleId, lead_distance: f64, window: Interval<f64>, now: f64) -> Self {
        let lead_time = f64::max(window.min - now, MIN_LEAD_TIME);
        Self {
            vehicle_id,
            target_speed: lead_distance / lead_time,
            effective_until: Some(window.min),
        }
    }

    /// Instructs a vehicle to resume cruising at `speed`.
    pub fn cruise(vehicle_id: VehicleId, speed: f64) -> Self {
        Self {
            vehicle_id,
            target_speed: speed,
            effective_until: None,
        }
    }
}
