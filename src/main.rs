//! Pod Racer entry point
//!
//! Runs a seeded local race and prints one status line per pod per lap.
//! Usage: `pod-racer [settings.json]`. An unreadable file falls back to defaults.

use pod_racer::Settings;
use pod_racer::scenario;
use pod_racer::sim::{SimEvent, tick};

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    if let Err(err) = run() {
        log::error!("{err}");
        eprintln!("pod-racer: {err}");
        std::process::exit(1);
    }
}

fn run() -> pod_racer::Result<()> {
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let mut sim = scenario::build(&settings)?;
    log::info!("Pod Racer starting: up to {} ticks", settings.ticks);

    for _ in 0..settings.ticks {
        for event in tick(&mut sim)? {
            if let SimEvent::LapCompleted { pod, laps } = event {
                if let Some(p) = sim.pod(pod) {
                    println!("tick {} pod {} lap {}: {}", sim.time_ticks, pod, laps, p.status());
                }
            }
        }
        if sim.is_finished() {
            log::info!("Race finished at tick {}", sim.time_ticks);
            break;
        }
    }

    for pod in sim.pods() {
        println!("pod {}: {}", pod.id(), pod.status());
    }
    Ok(())
}
