use std::time::Instant;

use intersection_sim::{Config, Error, Simulation};

/// The simulation time step in s.
const DT: f64 = 1.0 / 30.0;

/// A new vehicle is spawned this often, in s.
const SPAWN_INTERVAL: f64 = 0.3;

/// How long to simulate for, in s.
const DURATION: f64 = 600.0;

fn main() -> Result<(), Error> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_json(&std::fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    let mut sim = Simulation::new(config)?;
    let mut rng = rand::thread_rng();

    println!("Simulating...");
    let start = Instant::now();
    let mut since_spawn = SPAWN_INTERVAL;
    while sim.time() < DURATION {
        if since_spawn >= SPAWN_INTERVAL {
            sim.spawn_random_vehicle(&mut rng);
            since_spawn -= SPAWN_INTERVAL;
        }
        sim.step(DT);
        since_spawn += DT;

        if sim.frame() % 300 == 0 {
            let table = sim.intersection().scheduler().table();
            log::info!(
                "t = {:.0}s: {} vehicles, {} reservations",
                sim.time(),
                sim.iter_vehicles().count(),
                table.len()
            );
            if !table.conflicting_pairs().is_empty() {
                log::error!("conflicting reservations: {:?}", table.conflicting_pairs());
            }
        }
    }

    let stats = sim.intersection().scheduler().stats();
    println!(
        "Simulated {:.0}s in {:?}: {} admitted ({} as requested, {} sped up, {} squeezed, {} deferred), longest deferral {:.1}s",
        sim.time(),
        start.elapsed(),
        stats.admitted(),
        stats.requested,
        stats.front_fits,
        stats.gap_fits,
        stats.appended,
        stats.max_deferral,
    );
    Ok(())
}
