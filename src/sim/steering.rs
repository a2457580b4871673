//! Steering behaviors that turn a target into a force on a pod

use serde::{Deserialize, Serialize};

use super::pod::Pod;
use super::vector::Vector2D;
use crate::error::Result;

/// How pods pick their per-tick force
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Behavior {
    /// Desired velocity at max speed, minus current velocity, capped at max thrust
    #[default]
    Seek,
    /// Constant push of `thrust` straight at the checkpoint
    Follow { thrust: f64 },
}

impl Behavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            Behavior::Seek => "seek",
            Behavior::Follow { .. } => "follow",
        }
    }

    /// This tick's force toward the pod's current checkpoint, without applying it
    pub fn force(&self, pod: &Pod) -> Result<Vector2D> {
        let target = pod.current_checkpoint()?.position;
        Ok(match *self {
            Behavior::Seek => seek_force(pod, target),
            Behavior::Follow { thrust } => follow_force(pod, target, thrust),
        })
    }

    /// Apply this tick's force toward the pod's current checkpoint
    pub fn steer(&self, pod: &mut Pod) -> Result<Vector2D> {
        let force = self.force(pod)?;
        pod.apply_force(force);
        Ok(force)
    }
}

/// Classic seek steering force from `pod` toward `target`.
///
/// A pod sitting on its target gets a zero desired velocity, so the force
/// simply brakes it.
pub fn seek_force(pod: &Pod, target: Vector2D) -> Vector2D {
    let desired = (target - pod.position()).normalize().scale(pod.max_speed());
    (desired - pod.velocity()).limit(pod.max_thrust())
}

/// Seek the current checkpoint and apply the resulting force
pub fn seek(pod: &mut Pod) -> Result<Vector2D> {
    let target = pod.current_checkpoint()?.position;
    let steer = seek_force(pod, target);
    pod.apply_force(steer);
    Ok(steer)
}

/// Unclamped push of magnitude `thrust` toward `target`
pub fn follow_force(pod: &Pod, target: Vector2D, thrust: f64) -> Vector2D {
    (target - pod.position()).normalize().scale(thrust)
}

pub fn follow(pod: &mut Pod, thrust: f64) -> Result<Vector2D> {
    let target = pod.current_checkpoint()?.position;
    let force = follow_force(pod, target, thrust);
    pod.apply_force(force);
    Ok(force)
}
