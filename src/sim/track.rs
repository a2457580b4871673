//! Checkpoints and the circular track they form

use serde::{Deserialize, Serialize};

use super::vector::Vector2D;
use crate::consts::CHECKPOINT_RADIUS;
use crate::error::{Result, SimError};

/// A circular target zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub position: Vector2D,
    pub radius: f64,
}

impl Checkpoint {
    pub fn new(position: Vector2D) -> Self {
        Self::with_radius(position, CHECKPOINT_RADIUS)
    }

    pub fn with_radius(position: Vector2D, radius: f64) -> Self {
        Self { position, radius }
    }

    /// Inclusive: a point exactly on the rim is inside
    pub fn contains(&self, point: Vector2D) -> bool {
        point.distance(self.position) <= self.radius
    }
}

/// Ordered, circular sequence of checkpoints shared by every pod racing it.
///
/// Pods keep their own cursor into the track; the track itself never changes
/// after construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    checkpoints: Vec<Checkpoint>,
}

impl Track {
    pub fn new(checkpoints: Vec<Checkpoint>) -> Self {
        Self { checkpoints }
    }

    /// Build a track where every checkpoint shares one radius
    pub fn from_positions(positions: impl IntoIterator<Item = Vector2D>, radius: f64) -> Self {
        Self::new(
            positions
                .into_iter()
                .map(|p| Checkpoint::with_radius(p, radius))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    pub fn get(&self, index: usize) -> Result<&Checkpoint> {
        self.check_index(index)?;
        Ok(&self.checkpoints[index])
    }

    /// Index that follows `index`, wrapping to the start
    pub fn next_index(&self, index: usize) -> Result<usize> {
        self.check_index(index)?;
        Ok((index + 1) % self.checkpoints.len())
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<()> {
        if self.checkpoints.is_empty() {
            return Err(SimError::EmptyTrack);
        }
        if index >= self.checkpoints.len() {
            return Err(SimError::CheckpointOutOfRange {
                index,
                len: self.checkpoints.len(),
            });
        }
        Ok(())
    }
}
