//! Fixed tick driver
//!
//! One tick runs three passes over the active pods: apply forces, integrate,
//! then test and advance checkpoints. Pods never read each other's state.
//! Every force is computed before any is applied, so a failed tick leaves
//! no pod with leftover thrust.

use super::state::Simulation;
use crate::error::Result;

/// Something observable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// Pod entered checkpoint `checkpoint`; its cursor has already moved on
    CheckpointReached { pod: u32, checkpoint: usize },
    /// Pod's cursor wrapped back to the first checkpoint
    LapCompleted { pod: u32, laps: u32 },
    /// Pod reached the race lap limit
    Finished { pod: u32 },
}

/// Advance the simulation by one tick and report what happened, in pod order
pub fn tick(sim: &mut Simulation) -> Result<Vec<SimEvent>> {
    let behavior = sim.behavior;
    let arena = sim.arena;
    let lap_limit = sim.laps;

    let forces = sim
        .racers
        .iter()
        .filter(|r| !r.finished)
        .map(|r| behavior.force(&r.pod))
        .collect::<Result<Vec<_>>>()?;

    sim.time_ticks += 1;
    for (racer, force) in sim.racers.iter_mut().filter(|r| !r.finished).zip(forces) {
        racer.pod.apply_force(force);
    }

    for racer in sim.racers.iter_mut().filter(|r| !r.finished) {
        racer.pod.update();
        if let Some(arena) = arena {
            arena.bounce(&mut racer.pod);
        }
        log::trace!(
            "tick {} pod {}: pos=({:.1}, {:.1}) speed={}",
            sim.time_ticks,
            racer.pod.id(),
            racer.pod.position().x(),
            racer.pod.position().y(),
            racer.pod.speed()
        );
    }

    let mut events = Vec::new();
    for racer in sim.racers.iter_mut().filter(|r| !r.finished) {
        if !racer.pod.has_arrived_at_current_checkpoint()? {
            continue;
        }

        let pod = racer.pod.id();
        let checkpoint = racer.pod.checkpoint_index();
        let next = racer.pod.advance_checkpoint()?;
        log::debug!("Pod {} reached checkpoint {} at tick {}", pod, checkpoint, sim.time_ticks);
        events.push(SimEvent::CheckpointReached { pod, checkpoint });

        if next == 0 {
            racer.laps += 1;
            log::info!("Pod {} completed lap {}", pod, racer.laps);
            events.push(SimEvent::LapCompleted {
                pod,
                laps: racer.laps,
            });

            if lap_limit.is_some_and(|limit| racer.laps >= limit) {
                racer.finished = true;
                log::info!("Pod {} finished after {} ticks", pod, sim.time_ticks);
                events.push(SimEvent::Finished { pod });
            }
        }
    }

    Ok(events)
}
