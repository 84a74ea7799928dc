use crate::util::Interval;
use crate::{Direction, VehicleId};
use itertools::Itertools;

/// A vehicle's authorisation to occupy the crossing zone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reservation {
    /// The vehicle holding the reservation.
    pub vehicle_id: VehicleId,
    /// The direction the vehicle requested to cross towards.
    pub turn: Direction,
    /// The time window, `[start, end)` in s.
    pub window: Interval<f64>,
}

impl Reservation {
    /// Whether the two reservations would put vehicles with incompatible
    /// directions in the crossing zone at the same time.
    pub fn conflicts_with(&self, other: &Reservation) -> bool {
        !self.turn.compatible_with(other.turn) && self.window.overlaps(&other.window)
    }
}

/// The accepted reservations, at most one per vehicle,
/// kept sorted by the start of their window.
#[derive(Clone, Debug, Default)]
pub struct ReservationTable {
    entries: Vec<Reservation>,
}

impl ReservationTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Default::default()
    }

    /// Inserts a reservation, replacing any the vehicle already holds.
    /// Returns the replaced reservation.
    pub fn insert(&mut self, reservation: Reservation) -> Option<Reservation> {
        let replaced = self.remove(reservation.vehicle_id);
        let idx = self
            .entries
            .iter()
            .position(|r| r.window.min > reservation.window.min)
            .unwrap_or(self.entries.len());
        self.entries.insert(idx, reservation);
        replaced
    }

    /// Removes the vehicle's reservation, if it holds one.
    pub fn remove(&mut self, vehicle_id: VehicleId) -> Option<Reservation> {
        let idx = self
            .entries
            .iter()
            .position(|r| r.vehicle_id == vehicle_id)?;
        Some(self.entries.remove(idx))
    }

    /// Gets the vehicle's reservation, if it holds one.
    pub fn get(&self, vehicle_id: VehicleId) -> Option<&Reservation> {
        self.entries.iter().find(|r| r.vehicle_id == vehicle_id)
    }

    /// Iterates over the reservations in order of their start time.
    pub fn iter(&self) -> impl Iterator<Item = &Reservation> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds every pair of reservations which conflict with each other.
    /// Empty unless the scheduler's invariant has been broken.
    pub fn conflicting_pairs(&self) -> Vec<(VehicleId, VehicleId)> {
        self.entries
            .iter()
            .tuple_combinations()
            .filter(|(a, b)| a.conflicts_with(b))
            .map(|(a, b)| (a.vehicle_id, b.vehicle_id))
            .collect()
    }
}
