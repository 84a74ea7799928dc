#[cfg(feature = "debug")]
use crate::debug::take_debug_frame;
use crate::math::Rect;
use crate::road::{Orientation, Road};
use crate::vehicle::{Vehicle, VehicleAttributes};
use crate::{
    Config, Direction, Error, Instruction, Intersection, IntersectionGeometry, VehicleId,
    VehicleSet, VehicleState,
};
use rand::Rng;
use rand_distr::Distribution;

/// New vehicles cruise up to this much below the speed limit, in m/s.
const SPAWN_SPEED_SPREAD: f64 = 5.0; // m/s

/// A simulation of two roads crossing at an unsignalised intersection.
pub struct Simulation {
    /// The simulation parameters.
    config: Config,
    /// The extents of the world.
    world: Rect,
    /// The horizontal and vertical roads, in that order.
    roads: [Road; 2],
    /// The intersection where the roads cross.
    intersection: Intersection,
    /// The vehicles being simulated.
    vehicles: VehicleSet,
    /// The simulation time in s.
    time: f64,
    /// The current frame of simulation.
    frame: usize,
    /// Debugging information from the previously simulated frame.
    #[cfg(feature = "debug")]
    debug: serde_json::Value,
}

impl Simulation {
    /// Creates a new simulation with two roads crossing at the centre of the world.
    pub fn new(config: Config) -> Result<Self, Error> {
        config.validate()?;
        let world = Rect::new(0.0, 0.0, config.world_width, config.world_height);
        let roads = [
            Road::new(Orientation::Horizontal, 0.5, config.road_width, &world),
            Road::new(Orientation::Vertical, 0.5, config.road_width, &world),
        ];
        let geometry =
            IntersectionGeometry::build(roads[0].rect(), roads[1].rect(), config.factor)?;
        let intersection = Intersection::new(geometry, &config);
        Ok(Self {
            config,
            world,
            roads,
            intersection,
            vehicles: VehicleSet::with_key(),
            time: 0.0,
            frame: 0,
            #[cfg(feature = "debug")]
            debug: serde_json::Value::Null,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The extents of the world.
    pub fn world(&self) -> &Rect {
        &self.world
    }

    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    pub fn intersection(&self) -> &Intersection {
        &self.intersection
    }

    /// Adds a vehicle at the start of the road running along `heading`.
    pub fn add_vehicle(&mut self, attributes: &VehicleAttributes, heading: Direction) -> VehicleId {
        let road = if heading.is_horizontal() {
            &self.roads[0]
        } else {
            &self.roads[1]
        };
        let rear = road.spawn_point(heading, attributes.width);
        self.vehicles
            .insert_with_key(|id| Vehicle::new(id, attributes, heading, rear))
    }

    /// Adds a vehicle travelling in a random direction along a random road.
    ///
    /// Its length is drawn from the configured distribution and it cruises
    /// somewhat below the speed limit.
    pub fn spawn_random_vehicle<R: Rng>(&mut self, rng: &mut R) -> VehicleId {
        let road = &self.roads[rng.gen_range(0..self.roads.len())];
        let heading = road.directions()[rng.gen_range(0..2)];
        let lengths = &self.config.vehicle_lengths;
        let attributes = VehicleAttributes {
            length: lengths[rng.gen_range(0..lengths.len())],
            width: self.config.vehicle_width,
            cruise_speed: f64::max(
                self.config.speed_limit - rng.gen_range(0.0..=SPAWN_SPEED_SPREAD),
                self.config.min_speed,
            ),
        };
        self.add_vehicle(&attributes, heading)
    }

    /// Removes a vehicle from the simulation, along with its reservation.
    pub fn remove_vehicle(&mut self, id: VehicleId) {
        if self.vehicles.remove(id).is_some() {
            self.intersection.forget(id);
        }
    }

    /// Randomly assigns each vehicle a cruising speed, which is sampled from
    /// a normal distribution centred on the speed limit with a standard deviation
    /// of `stddev` times the speed limit.
    pub fn randomise_cruise_speeds(&mut self, stddev: f64) -> Result<(), Error> {
        let mut rand = rand::thread_rng();
        let distr = rand_distr::Normal::new(1.0, stddev)
            .map_err(|err| Error::InvalidConfig(format!("standard deviation {stddev}: {err}")))?;
        for (_, vehicle) in &mut self.vehicles {
            let factor = distr.sample(&mut rand).clamp(0.75, 1.25);
            vehicle.set_cruise_vel(factor * self.config.speed_limit);
        }
        Ok(())
    }

    /// Sends a speed instruction to a vehicle.
    pub fn apply_instruction(&mut self, instruction: &Instruction) -> Result<(), Error> {
        let vehicle = self
            .vehicles
            .get_mut(instruction.vehicle_id)
            .ok_or(Error::UnknownVehicle(instruction.vehicle_id))?;
        vehicle.apply_instruction(instruction);
        Ok(())
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// The intersection observes the vehicles at the start of the step, and
    /// the vehicles then move at the speeds in effect at that time.
    pub fn step(&mut self, dt: f64) {
        self.update_intersection();
        self.integrate(dt);
        self.remove_exited_vehicles();
        self.time += dt;
        self.frame += 1;

        #[cfg(feature = "debug")]
        {
            self.debug = take_debug_frame();
        }
    }

    /// Gets the current simulation time in s.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Gets the current simulation frame index.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Returns an iterator over all the vehicles in the simulation.
    pub fn iter_vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.values()
    }

    /// Gets a reference to the vehicle with the given ID.
    pub fn get_vehicle(&self, vehicle_id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(vehicle_id)
    }

    /// Gets the debugging information for the previously simulated frame as JSON array.
    #[cfg(feature = "debug")]
    pub fn debug(&mut self) -> serde_json::Value {
        self.debug.clone()
    }

    /// Lets the intersection observe the vehicles and hands out its instructions.
    fn update_intersection(&mut self) {
        let states = self
            .vehicles
            .values()
            .map(VehicleState::from)
            .collect::<Vec<_>>();
        for instruction in self.intersection.on_tick(self.time, &states) {
            if let Err(err) = self.apply_instruction(&instruction) {
                log::warn!("dropping instruction {instruction:?}: {err}");
            }
        }
    }

    /// Moves all vehicles along their headings.
    fn integrate(&mut self, dt: f64) {
        for (_, vehicle) in &mut self.vehicles {
            vehicle.integrate(self.time, dt);
        }
    }

    /// Removes vehicles which have driven out of the world.
    fn remove_exited_vehicles(&mut self) {
        let exited = self
            .vehicles
            .iter()
            .filter(|(_, vehicle)| vehicle.has_exited(&self.world))
            .map(|(id, _)| id)
            .collect::<Vec<_>>();
        for vehicle_id in exited {
            self.remove_vehicle(vehicle_id);
        }
    }
}
