//! Tests that drive whole vehicles through the intersection.

use intersection_sim::{
    Config, Direction, Error, Instruction, ReleaseTrigger, Simulation, VehicleAttributes,
};
use assert_approx_eq::assert_approx_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

const ATTRIBUTES: VehicleAttributes = VehicleAttributes {
    length: 40.0,
    width: 15.0,
    cruise_speed: 20.0,
};

/// Test that a vehicle's position increases monotonically.
#[test]
fn vehicle_drives_forward() {
    let mut sim = Simulation::new(Config::default()).unwrap();
    let veh = sim.add_vehicle(&ATTRIBUTES, Direction::East);

    let mut pos = sim.get_vehicle(veh).unwrap().position().x;
    for _ in 0..100 {
        sim.step(0.1);
        let next_pos = sim.get_vehicle(veh).unwrap().position().x;
        assert!(next_pos > pos);
        pos = next_pos;
    }
}

/// Test that a timed instruction is obeyed for every step starting before it lapses.
#[test]
fn speed_override_lasts_until_expiry() {
    let mut sim = Simulation::new(Config::default()).unwrap();
    let veh = sim.add_vehicle(&ATTRIBUTES, Direction::East);
    sim.apply_instruction(&Instruction {
        vehicle_id: veh,
        target_speed: 10.0,
        effective_until: Some(1.0),
    })
    .unwrap();

    let start = sim.get_vehicle(veh).unwrap().position().x;
    sim.step(0.5);
    sim.step(0.5);
    assert_approx_eq!(sim.time(), 1.0);
    let pos = sim.get_vehicle(veh).unwrap().position().x;
    assert_approx_eq!(pos - start, 10.0);

    sim.step(0.5);
    let next_pos = sim.get_vehicle(veh).unwrap().position().x;
    assert_approx_eq!(next_pos - pos, 10.0);
    assert_eq!(sim.get_vehicle(veh).unwrap().speed_overrides().count(), 0);
}

/// Test that randomised cruising speeds stay close to the speed limit.
#[test]
fn randomised_cruise_speeds_are_clamped() {
    let config = Config::default();
    let limit = config.speed_limit;
    let mut sim = Simulation::new(config).unwrap();
    for heading in Direction::ALL {
        for _ in 0..5 {
            sim.add_vehicle(&ATTRIBUTES, heading);
        }
    }

    sim.randomise_cruise_speeds(1.0).unwrap();
    for vehicle in sim.iter_vehicles() {
        assert!(vehicle.cruise_vel() >= 0.75 * limit - 1e-9);
        assert!(vehicle.cruise_vel() <= 1.25 * limit + 1e-9);
    }

    assert!(matches!(
        sim.randomise_cruise_speeds(-1.0),
        Err(Error::InvalidConfig(_))
    ));
}

/// Test that of two vehicles reaching the intersection together,
/// the second is slowed down and both eventually leave the world.
#[test]
fn simultaneous_arrivals_are_separated() {
    let mut sim = Simulation::new(Config::default()).unwrap();
    let east = sim.add_vehicle(&ATTRIBUTES, Direction::East);
    let south = sim.add_vehicle(&ATTRIBUTES, Direction::South);

    while !sim.intersection().controls(east) {
        sim.step(0.25);
        assert!(sim.time() < 20.0);
    }
    assert!(sim.intersection().controls(south));

    let table = sim.intersection().scheduler().table();
    assert_eq!(table.len(), 2);
    assert!(table.conflicting_pairs().is_empty());
    let east_window = table.get(east).unwrap().window;
    let south_window = table.get(south).unwrap().window;
    assert!(south_window.min >= east_window.max);

    assert_eq!(sim.get_vehicle(east).unwrap().speed_overrides().count(), 0);
    let overrides = sim
        .get_vehicle(south)
        .unwrap()
        .speed_overrides()
        .copied()
        .collect::<Vec<_>>();
    assert_eq!(overrides.len(), 1);
    assert!(overrides[0].speed < ATTRIBUTES.cruise_speed);
    assert_eq!(overrides[0].until, south_window.min);
    assert!(sim.get_vehicle(south).unwrap().vel() < ATTRIBUTES.cruise_speed);

    while sim.time() < 120.0 {
        sim.step(0.25);
    }
    assert_eq!(sim.iter_vehicles().count(), 0);
    assert!(sim.intersection().scheduler().table().is_empty());
    assert_eq!(sim.intersection().scheduler().stats().released, 2);
}

/// Test that vehicles from opposite directions are allowed through together.
#[test]
fn opposite_arrivals_share_the_intersection() {
    let mut sim = Simulation::new(Config::default()).unwrap();
    let east = sim.add_vehicle(&ATTRIBUTES, Direction::East);
    let west = sim.add_vehicle(&ATTRIBUTES, Direction::West);

    while !sim.intersection().controls(east) {
        sim.step(0.25);
    }
    assert!(sim.intersection().controls(west));

    let table = sim.intersection().scheduler().table();
    let a = table.get(east).unwrap().window;
    let b = table.get(west).unwrap().window;
    assert!(a.overlaps(&b));
    assert_eq!(sim.get_vehicle(west).unwrap().speed_overrides().count(), 0);
    assert_eq!(sim.intersection().scheduler().stats().requested, 2);
}

/// Test that removing a vehicle also frees its reservation.
#[test]
fn removed_vehicle_releases_reservation() {
    let mut sim = Simulation::new(Config::default()).unwrap();
    let veh = sim.add_vehicle(&ATTRIBUTES, Direction::North);
    while !sim.intersection().controls(veh) {
        sim.step(0.25);
    }
    assert_eq!(sim.intersection().scheduler().table().len(), 1);

    sim.remove_vehicle(veh);
    assert!(sim.get_vehicle(veh).is_none());
    assert!(sim.intersection().scheduler().table().is_empty());
    assert!(!sim.intersection().controls(veh));

    sim.remove_vehicle(veh);
    sim.step(0.25);
    assert!(sim.intersection().scheduler().table().is_empty());
}

#[test]
fn instruction_for_unknown_vehicle_is_rejected() {
    let mut sim = Simulation::new(Config::default()).unwrap();
    let veh = sim.add_vehicle(&ATTRIBUTES, Direction::West);
    sim.remove_vehicle(veh);
    let result = sim.apply_instruction(&Instruction::cruise(veh, 10.0));
    assert!(matches!(result, Err(Error::UnknownVehicle(id)) if id == veh));
}

#[test]
fn invalid_config_is_rejected() {
    let config = Config {
        road_width: 2000.0,
        ..Config::default()
    };
    assert!(matches!(
        Simulation::new(config),
        Err(Error::InvalidConfig(_))
    ));
}

/// Test that heavy random traffic never produces conflicting reservations.
fn run_random_traffic(config: Config) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut sim = Simulation::new(config).unwrap();
    let mut since_spawn = 0.0;

    while sim.time() < 120.0 {
        if since_spawn >= 0.3 {
            sim.spawn_random_vehicle(&mut rng);
            since_spawn -= 0.3;
        }
        sim.step(1.0 / 30.0);
        since_spawn += 1.0 / 30.0;

        let scheduler = sim.intersection().scheduler();
        assert!(scheduler.table().conflicting_pairs().is_empty());
        assert!(scheduler.table().len() <= sim.iter_vehicles().count());
        for vehicle in sim.iter_vehicles() {
            for speed_override in vehicle.speed_overrides() {
                assert!(speed_override.speed.is_finite());
                assert!(speed_override.speed > 0.0);
            }
        }
    }

    let stats = sim.intersection().scheduler().stats();
    assert!(stats.admitted() > 100);
    assert!(stats.admitted() > stats.requested);
}

#[test]
fn random_traffic_keeps_reservations_disjoint() {
    run_random_traffic(Config::default());
}

#[test]
fn random_traffic_with_crossing_zone_release() {
    run_random_traffic(Config {
        release_on: ReleaseTrigger::CrossingZone,
        factor: 2.5,
        ..Config::default()
    });
}
