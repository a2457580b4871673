//! Pod entity: kinematic state, physical constants and the integration step

use std::sync::Arc;

use super::track::{Checkpoint, Track};
use super::vector::Vector2D;
use crate::consts::*;
use crate::error::{Result, SimError};
use crate::round_half_up;
use crate::settings::PodTuning;

/// A racing pod
#[derive(Debug, Clone)]
pub struct Pod {
    pub(crate) id: u32,
    pub(crate) position: Vector2D,
    pub(crate) velocity: Vector2D,
    /// Force accumulated this tick, divided by mass. Zeroed by `update`.
    thrust: Vector2D,
    /// Radians. Only changes through the angular terms, never from velocity.
    heading: f64,
    angular_velocity: f64,
    angular_acceleration: f64,
    mass: f64,
    radius: f64,
    max_speed: f64,
    max_thrust: f64,
    friction: f64,
    time_factor: f64,
    track: Arc<Track>,
    checkpoint_index: usize,
}

impl Pod {
    pub fn new(position: Vector2D, velocity: Vector2D, thrust: Vector2D, heading: f64) -> Self {
        Self {
            id: 0,
            position,
            velocity,
            thrust,
            heading,
            angular_velocity: 0.0,
            angular_acceleration: 0.0,
            mass: POD_MASS,
            radius: POD_RADIUS,
            max_speed: POD_MAX_SPEED,
            max_thrust: POD_MAX_THRUST,
            friction: POD_FRICTION,
            time_factor: TIME_FACTOR,
            track: Arc::default(),
            checkpoint_index: 0,
        }
    }

    /// Pod at rest at `position`
    pub fn at(position: Vector2D) -> Self {
        Self::new(position, Vector2D::ZERO, Vector2D::ZERO, 0.0)
    }

    /// Advance one tick. The order of these steps is fixed: friction acts on
    /// velocity plus thrust, and the time factor scales displacement only.
    pub fn update(&mut self) {
        self.velocity = (self.velocity + self.thrust).scale(self.friction);
        self.position = self.position + self.velocity.scale(self.time_factor);
        self.angular_velocity += self.angular_acceleration;
        self.heading += self.angular_velocity;
        self.thrust = Vector2D::ZERO;
    }

    /// Accumulate `force / mass` into this tick's thrust
    pub fn apply_force(&mut self, force: Vector2D) {
        // mass is validated positive on every path that sets it
        let accel = Vector2D::new(force.x() / self.mass, force.y() / self.mass);
        self.thrust = self.thrust + accel;
    }

    /// Damp velocity on its own, outside of `update`
    pub fn apply_friction(&mut self) {
        self.velocity = self.velocity.scale(self.friction);
    }

    pub fn current_checkpoint(&self) -> Result<&Checkpoint> {
        self.track.get(self.checkpoint_index)
    }

    pub fn has_arrived_at_current_checkpoint(&self) -> Result<bool> {
        Ok(self.current_checkpoint()?.contains(self.position))
    }

    /// Move the cursor to the next checkpoint, wrapping at the end of the track.
    /// Returns the new index.
    pub fn advance_checkpoint(&mut self) -> Result<usize> {
        self.checkpoint_index = self.track.next_index(self.checkpoint_index)?;
        Ok(self.checkpoint_index)
    }

    /// One-line human readable status
    pub fn status(&self) -> String {
        format!(
            "Position: ({}, {}) Magnitude: {}",
            round_half_up(self.position.x()),
            round_half_up(self.position.y()),
            self.velocity.magnitude().trunc()
        )
    }

    pub fn apply_tuning(&mut self, tuning: &PodTuning) -> Result<()> {
        self.set_mass(tuning.mass)?;
        self.set_radius(tuning.radius)?;
        self.set_max_speed(tuning.max_speed)?;
        self.set_max_thrust(tuning.max_thrust)?;
        self.set_friction(tuning.friction)
    }

    // === Setters ===

    pub fn set_mass(&mut self, mass: f64) -> Result<()> {
        self.mass = positive("mass", mass)?;
        Ok(())
    }

    pub fn set_radius(&mut self, radius: f64) -> Result<()> {
        self.radius = positive("radius", radius)?;
        Ok(())
    }

    pub fn set_max_speed(&mut self, max_speed: f64) -> Result<()> {
        self.max_speed = positive("max_speed", max_speed)?;
        Ok(())
    }

    pub fn set_max_thrust(&mut self, max_thrust: f64) -> Result<()> {
        self.max_thrust = positive("max_thrust", max_thrust)?;
        Ok(())
    }

    pub fn set_friction(&mut self, friction: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&friction) {
            return Err(SimError::InvalidPhysics {
                field: "friction",
                value: friction,
            });
        }
        self.friction = friction;
        Ok(())
    }

    pub fn set_time_factor(&mut self, time_factor: f64) -> Result<()> {
        self.time_factor = positive("time_factor", time_factor)?;
        Ok(())
    }

    /// Race a different track. The cursor restarts at the first checkpoint.
    pub fn set_track(&mut self, track: Arc<Track>) {
        self.track = track;
        self.checkpoint_index = 0;
    }

    pub fn set_current_checkpoint(&mut self, index: usize) -> Result<()> {
        self.track.check_index(index)?;
        self.checkpoint_index = index;
        Ok(())
    }

    pub fn set_heading(&mut self, heading: f64) {
        self.heading = heading;
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: f64) {
        self.angular_velocity = angular_velocity;
    }

    pub fn set_angular_acceleration(&mut self, angular_acceleration: f64) {
        self.angular_acceleration = angular_acceleration;
    }

    // === Accessors ===

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn position(&self) -> Vector2D {
        self.position
    }

    pub fn velocity(&self) -> Vector2D {
        self.velocity
    }

    /// Rounded velocity magnitude
    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    pub fn thrust(&self) -> Vector2D {
        self.thrust
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn max_thrust(&self) -> f64 {
        self.max_thrust
    }

    pub fn friction(&self) -> f64 {
        self.friction
    }

    pub fn time_factor(&self) -> f64 {
        self.time_factor
    }

    pub fn checkpoint_index(&self) -> usize {
        self.checkpoint_index
    }

    pub fn track(&self) -> &Arc<Track> {
        &self.track
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::InvalidPhysics { field, value })
    }
}
