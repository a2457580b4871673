//! Run settings
//!
//! Stored as JSON. Every field has a default, so partial files are fine.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};
use crate::scenario::Bounds;
use crate::sim::{Arena, Behavior, Pod, Vector2D};

/// Physical constants applied to every generated pod
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PodTuning {
    pub mass: f64,
    pub radius: f64,
    pub max_speed: f64,
    pub max_thrust: f64,
    pub friction: f64,
}

impl Default for PodTuning {
    fn default() -> Self {
        Self {
            mass: POD_MASS,
            radius: POD_RADIUS,
            max_speed: POD_MAX_SPEED,
            max_thrust: POD_MAX_THRUST,
            friction: POD_FRICTION,
        }
    }
}

/// Everything needed to build and run a race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed for reproducibility
    pub seed: u64,

    // === Scenario ===
    pub checkpoint_count: usize,
    pub pod_count: usize,
    pub checkpoint_radius: f64,
    /// Rectangle checkpoints are sampled from
    pub checkpoint_area: Bounds,
    /// Rectangle pods spawn in
    pub spawn_area: Bounds,

    // === Race ===
    /// Laps to finish; `None` races until `ticks` runs out
    pub laps: Option<u32>,
    /// Upper bound on ticks for a demo run
    pub ticks: u64,
    pub behavior: Behavior,
    /// Displacement multiplier (slow motion below 1.0)
    pub time_factor: f64,
    /// Bounce pods off the map edges
    pub arena: Option<Arena>,

    // === Pods ===
    pub pod: PodTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 1,

            checkpoint_count: 4,
            pod_count: 1,
            checkpoint_radius: CHECKPOINT_RADIUS,
            checkpoint_area: Bounds::new(
                Vector2D::from(CHECKPOINT_AREA_MIN),
                Vector2D::from(CHECKPOINT_AREA_MAX),
            ),
            spawn_area: Bounds::new(
                Vector2D::new(POD_SPAWN_MIN, POD_SPAWN_MIN),
                Vector2D::new(POD_SPAWN_MAX, POD_SPAWN_MAX),
            ),

            laps: Some(3),
            ticks: 2000,
            behavior: Behavior::Seek,
            time_factor: TIME_FACTOR,
            arena: None,

            pod: PodTuning::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!(
                    "Using default settings ({}: {})",
                    path.as_ref().display(),
                    err
                );
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Reject values a race cannot be built from
    pub fn validate(&self) -> Result<()> {
        if self.checkpoint_count == 0 {
            return Err(SimError::EmptyTrack);
        }
        if !(self.checkpoint_radius.is_finite() && self.checkpoint_radius > 0.0) {
            return Err(SimError::InvalidPhysics {
                field: "checkpoint_radius",
                value: self.checkpoint_radius,
            });
        }
        if self.laps == Some(0) {
            return Err(SimError::InvalidSettings("laps must be at least 1".into()));
        }
        if let Behavior::Follow { thrust } = self.behavior {
            if !(thrust.is_finite() && thrust >= 0.0) {
                return Err(SimError::InvalidPhysics {
                    field: "thrust",
                    value: thrust,
                });
            }
        }
        self.checkpoint_area.validate("checkpoint_area")?;
        self.spawn_area.validate("spawn_area")?;

        // Pod setters own the physical limits
        let mut scratch = Pod::at(Vector2D::ZERO);
        scratch.apply_tuning(&self.pod)?;
        scratch.set_time_factor(self.time_factor)
    }
}
