//! Seeded scenario generation
//!
//! Same seed, same track and spawn points.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::settings::{PodTuning, Settings};
use crate::sim::{Checkpoint, Pod, Simulation, Track, Vector2D};

/// Axis-aligned sampling rectangle, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vector2D,
    pub max: Vector2D,
}

impl Bounds {
    pub fn new(min: Vector2D, max: Vector2D) -> Self {
        Self { min, max }
    }

    pub fn validate(&self, name: &str) -> Result<()> {
        let finite = [self.min.x(), self.min.y(), self.max.x(), self.max.y()]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.min.x() > self.max.x() || self.min.y() > self.max.y() {
            return Err(SimError::InvalidSettings(format!(
                "{name}: min {:?} must not exceed max {:?}",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// Uniform point inside the rectangle. The bounds must pass `validate`;
    /// `random_range` panics on an inverted range.
    pub fn sample(&self, rng: &mut impl Rng) -> Vector2D {
        Vector2D::new(
            rng.random_range(self.min.x()..=self.max.x()),
            rng.random_range(self.min.y()..=self.max.y()),
        )
    }
}

pub fn rng_from_seed(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

pub fn generate_checkpoints(
    rng: &mut impl Rng,
    count: usize,
    area: &Bounds,
    radius: f64,
) -> Result<Vec<Checkpoint>> {
    area.validate("checkpoint_area")?;
    Ok((0..count)
        .map(|_| Checkpoint::with_radius(area.sample(rng), radius))
        .collect())
}

/// Pods at rest inside `spawn`, all facing +x
pub fn generate_pods(
    rng: &mut impl Rng,
    count: usize,
    spawn: &Bounds,
    tuning: &PodTuning,
    time_factor: f64,
) -> Result<Vec<Pod>> {
    spawn.validate("spawn_area")?;
    (0..count)
        .map(|_| {
            let mut pod = Pod::at(spawn.sample(rng));
            pod.apply_tuning(tuning)?;
            pod.set_time_factor(time_factor)?;
            Ok(pod)
        })
        .collect()
}

/// Build a ready-to-tick simulation from settings
pub fn build(settings: &Settings) -> Result<Simulation> {
    settings.validate()?;
    let mut rng = rng_from_seed(settings.seed);

    let checkpoints = generate_checkpoints(
        &mut rng,
        settings.checkpoint_count,
        &settings.checkpoint_area,
        settings.checkpoint_radius,
    )?;
    let pods = generate_pods(
        &mut rng,
        settings.pod_count,
        &settings.spawn_area,
        &settings.pod,
        settings.time_factor,
    )?;
    log::info!(
        "Scenario seed {}: {} checkpoints, {} pods, {}",
        settings.seed,
        checkpoints.len(),
        pods.len(),
        settings.behavior.as_str()
    );

    Ok(Simulation::new(Track::new(checkpoints), pods)?
        .with_behavior(settings.behavior)
        .with_arena(settings.arena)
        .with_laps(settings.laps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick;

    #[test]
    fn test_same_seed_same_track() {
        let a = build(&Settings::default()).unwrap();
        let b = build(&Settings::default()).unwrap();
        assert_eq!(a.track(), b.track());
        assert_eq!(
            a.pods().map(|p| p.position()).collect::<Vec<_>>(),
            b.pods().map(|p| p.position()).collect::<Vec<_>>()
        );

        let other = build(&Settings {
            seed: 2,
            ..Default::default()
        })
        .unwrap();
        assert_ne!(a.track(), other.track());
    }

    #[test]
    fn test_generated_points_stay_in_bounds() {
        let settings = Settings {
            checkpoint_count: 50,
            pod_count: 10,
            ..Default::default()
        };
        let sim = build(&settings).unwrap();
        for cp in sim.track().checkpoints() {
            assert!((1200.0..=14000.0).contains(&cp.position.x()));
            assert!((1200.0..=7800.0).contains(&cp.position.y()));
            assert_eq!(cp.radius, 600.0);
        }
        for pod in sim.pods() {
            assert!((0.0..=100.0).contains(&pod.position().x()));
            assert!((0.0..=100.0).contains(&pod.position().y()));
            assert_eq!(pod.velocity(), Vector2D::ZERO);
        }
    }

    #[test]
    fn test_tuning_reaches_pods() {
        let settings = Settings {
            time_factor: 0.25,
            pod: PodTuning {
                mass: 3.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let sim = build(&settings).unwrap();
        let pod = sim.pod(1).unwrap();
        assert_eq!(pod.mass(), 3.0);
        assert_eq!(pod.time_factor(), 0.25);
    }

    #[test]
    fn test_degenerate_bounds_sample_the_point() {
        let point = Vector2D::new(5.0, 7.0);
        let bounds = Bounds::new(point, point);
        assert_eq!(bounds.sample(&mut rng_from_seed(3)), point);
    }

    #[test]
    fn test_generators_reject_inverted_bounds() {
        let inverted = Bounds::new(Vector2D::new(10.0, 0.0), Vector2D::new(0.0, 10.0));
        let mut rng = rng_from_seed(1);
        assert!(matches!(
            generate_checkpoints(&mut rng, 3, &inverted, 600.0),
            Err(SimError::InvalidSettings(_))
        ));
        assert!(matches!(
            generate_pods(&mut rng, 2, &inverted, &PodTuning::default(), 1.0),
            Err(SimError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_default_race_finishes() {
        let mut sim = build(&Settings::default()).unwrap();
        for _ in 0..Settings::default().ticks {
            tick(&mut sim).unwrap();
            if sim.is_finished() {
                break;
            }
        }
        assert!(sim.is_finished());
        assert_eq!(sim.laps_completed(1), Some(3));
    }
}
