//! Simulation context: one track, the pods racing it, and race progress

use std::sync::Arc;

use super::arena::Arena;
use super::pod::Pod;
use super::steering::Behavior;
use super::track::Track;
use crate::error::{Result, SimError};

/// A pod plus its lap bookkeeping
#[derive(Debug, Clone)]
pub struct Racer {
    pub pod: Pod,
    /// Completed laps (cursor wrapped back to checkpoint 0)
    pub laps: u32,
    /// Reached the lap limit; no longer steered or integrated
    pub finished: bool,
}

/// Complete run state. Built once, advanced one tick at a time by `tick`.
#[derive(Debug, Clone)]
pub struct Simulation {
    track: Arc<Track>,
    /// Active racers (sorted by pod id)
    pub(crate) racers: Vec<Racer>,
    pub behavior: Behavior,
    /// Optional walls; `None` leaves the plane unbounded
    pub arena: Option<Arena>,
    /// Race length; `None` races forever
    pub laps: Option<u32>,
    /// Simulation tick counter
    pub time_ticks: u64,
    next_id: u32,
}

impl Simulation {
    /// Every pod is re-pointed at the shared track, keeping its cursor.
    pub fn new(track: Track, pods: Vec<Pod>) -> Result<Self> {
        if track.is_empty() {
            return Err(SimError::EmptyTrack);
        }

        let mut sim = Self {
            track: Arc::new(track),
            racers: Vec::with_capacity(pods.len()),
            behavior: Behavior::default(),
            arena: None,
            laps: None,
            time_ticks: 0,
            next_id: 1,
        };
        for pod in pods {
            sim.add_pod(pod)?;
        }

        log::info!(
            "Simulation: {} checkpoints, {} pods",
            sim.track.len(),
            sim.racers.len()
        );
        Ok(sim)
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_arena(mut self, arena: Option<Arena>) -> Self {
        self.arena = arena;
        self
    }

    pub fn with_laps(mut self, laps: Option<u32>) -> Self {
        self.laps = laps;
        self
    }

    /// Add a pod to the race and return its id
    pub fn add_pod(&mut self, mut pod: Pod) -> Result<u32> {
        let cursor = pod.checkpoint_index();
        pod.set_track(self.track.clone());
        pod.set_current_checkpoint(cursor)?;

        let id = self.next_entity_id();
        pod.id = id;
        self.racers.push(Racer {
            pod,
            laps: 0,
            finished: false,
        });
        Ok(id)
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn track(&self) -> &Arc<Track> {
        &self.track
    }

    pub fn racers(&self) -> &[Racer] {
        &self.racers
    }

    pub fn pods(&self) -> impl Iterator<Item = &Pod> {
        self.racers.iter().map(|r| &r.pod)
    }

    pub fn pod(&self, id: u32) -> Option<&Pod> {
        self.pods().find(|p| p.id() == id)
    }

    /// Retarget a racing pod within the shared track
    pub fn set_pod_checkpoint(&mut self, id: u32, index: usize) -> Result<()> {
        let racer = self
            .racers
            .iter_mut()
            .find(|r| r.pod.id() == id)
            .ok_or(SimError::UnknownPod(id))?;
        racer.pod.set_current_checkpoint(index)
    }

    pub fn laps_completed(&self, id: u32) -> Option<u32> {
        self.racers.iter().find(|r| r.pod.id() == id).map(|r| r.laps)
    }

    /// True once every pod has raced the lap limit. Never true without one.
    pub fn is_finished(&self) -> bool {
        self.laps.is_some() && self.racers.iter().all(|r| r.finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::CHECKPOINT_RADIUS;
    use crate::sim::vector::Vector2D;

    fn track() -> Track {
        Track::from_positions(
            [Vector2D::new(1000.0, 0.0), Vector2D::new(1000.0, 4000.0)],
            CHECKPOINT_RADIUS,
        )
    }

    #[test]
    fn test_new_rejects_empty_track() {
        let result = Simulation::new(Track::default(), vec![Pod::at(Vector2D::ZERO)]);
        assert!(matches!(result, Err(SimError::EmptyTrack)));
    }

    #[test]
    fn test_pods_share_one_track_and_get_ids() {
        let sim = Simulation::new(
            track(),
            vec![Pod::at(Vector2D::ZERO), Pod::at(Vector2D::new(50.0, 50.0))],
        )
        .unwrap();

        let ids: Vec<u32> = sim.pods().map(|p| p.id()).collect();
        assert_eq!(ids, vec![1, 2]);
        for pod in sim.pods() {
            assert!(Arc::ptr_eq(pod.track(), sim.track()));
        }
    }

    #[test]
    fn test_cursor_is_kept_and_validated() {
        let mut origin = Pod::at(Vector2D::ZERO);
        origin.set_track(Arc::new(track()));
        origin.set_current_checkpoint(1).unwrap();
        let sim = Simulation::new(track(), vec![origin]).unwrap();
        assert_eq!(sim.pod(1).unwrap().checkpoint_index(), 1);

        let mut stray = Pod::at(Vector2D::ZERO);
        stray.set_track(Arc::new(Track::from_positions(
            (0..4).map(|i| Vector2D::new(f64::from(i), 0.0)),
            CHECKPOINT_RADIUS,
        )));
        stray.set_current_checkpoint(3).unwrap();
        let result = Simulation::new(track(), vec![stray]);
        assert!(matches!(
            result,
            Err(SimError::CheckpointOutOfRange { index: 3, len: 2 })
        ));
    }

    #[test]
    fn test_unlimited_race_never_finishes() {
        let sim = Simulation::new(track(), vec![]).unwrap();
        assert!(!sim.is_finished());
        assert!(sim.with_laps(Some(3)).is_finished());
    }

    #[test]
    fn test_set_pod_checkpoint_stays_on_shared_track() {
        let mut sim = Simulation::new(track(), vec![Pod::at(Vector2D::ZERO)]).unwrap();
        sim.set_pod_checkpoint(1, 1).unwrap();
        assert_eq!(sim.pod(1).unwrap().checkpoint_index(), 1);
        assert!(Arc::ptr_eq(sim.pod(1).unwrap().track(), sim.track()));

        assert!(matches!(
            sim.set_pod_checkpoint(1, 2),
            Err(SimError::CheckpointOutOfRange { index: 2, len: 2 })
        ));
        assert_eq!(sim.pod(1).unwrap().checkpoint_index(), 1);
        assert!(matches!(sim.set_pod_checkpoint(7, 0), Err(SimError::UnknownPod(7))));
    }
}
