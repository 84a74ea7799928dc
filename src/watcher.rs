use crate::math::Rect;
use crate::VehicleId;
use std::collections::BTreeSet;

/// Tracks which vehicles are inside a boundary from one tick to the next.
#[derive(Clone, Debug, Default)]
pub struct BoundaryWatcher {
    inside: BTreeSet<VehicleId>,
}

/// The vehicles which crossed a boundary during one tick, in ascending ID order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Crossings {
    pub arrived: Vec<VehicleId>,
    pub departed: Vec<VehicleId>,
}

impl BoundaryWatcher {
    pub fn new() -> Self {
        Default::default()
    }

    /// Updates the set of vehicles inside `boundary` and reports the difference
    /// from the previous tick.
    ///
    /// # Parameters
    /// * `vehicles` - Every vehicle in the world and the area it covers
    /// * `boundary` - The area being watched
    pub fn tick<'a>(
        &mut self,
        vehicles: impl IntoIterator<Item = (VehicleId, &'a Rect)>,
        boundary: &Rect,
    ) -> Crossings {
        let current = vehicles
            .into_iter()
            .filter(|(_, rect)| rect.intersects(boundary))
            .map(|(id, _)| id)
            .collect::<BTreeSet<_>>();
        let crossings = Crossings {
            arrived: current.difference(&self.inside).copied().collect(),
            departed: self.inside.difference(&current).copied().collect(),
        };
        self.inside = current;
        crossings
    }

    /// Whether the vehicle was inside the boundary at the last tick.
    pub fn contains(&self, id: VehicleId) -> bool {
        self.inside.contains(&id)
    }

    /// Stops tracking a vehicle without reporting a departure.
    pub fn forget(&mut self, id: VehicleId) {
        self.inside.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.inside.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inside.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn reports_each_crossing_once() {
        let mut ids = SlotMap::<VehicleId, ()>::with_key();
        let (a, b) = (ids.insert(()), ids.insert(()));
        let boundary = Rect::new(0.0, 0.0, 10.0, 10.0);
        let inside = Rect::new(2.0, 2.0, 1.0, 1.0);
        let outside = Rect::new(20.0, 2.0, 1.0, 1.0);
        let mut watcher = BoundaryWatcher::new();

        let c = watcher.tick([(a, &inside), (b, &outside)], &boundary);
        assert_eq!(c.arrived, vec![a]);
        assert!(c.departed.is_empty());

        let c = watcher.tick([(a, &inside), (b, &inside)], &boundary);
        assert_eq!(c.arrived, vec![b]);
        assert!(c.departed.is_empty());

        let c = watcher.tick([(a, &outside), (b, &inside)], &boundary);
        assert!(c.arrived.is_empty());
        assert_eq!(c.departed, vec![a]);

        let c = watcher.tick([(a, &outside), (b, &inside)], &boundary);
        assert_eq!(c, Crossings::default());
    }

    #[test]
    fn forgotten_vehicles_do_not_depart() {
        let mut ids = SlotMap::<VehicleId, ()>::with_key();
        let a = ids.insert(());
        let boundary = Rect::new(0.0, 0.0, 10.0, 10.0);
        let mut watcher = BoundaryWatcher::new();
        watcher.tick([(a, &Rect::new(1.0, 1.0, 1.0, 1.0))], &boundary);
        watcher.forget(a);
        let c = watcher.tick(std::iter::empty::<(VehicleId, &Rect)>(), &boundary);
        assert!(c.departed.is_empty());
        assert!(watcher.is_empty());
    }
}
