//! Pod Racer - checkpoint racing pods on a 2D plane
//!
//! Core modules:
//! - `sim`: Deterministic steering and physics kernel (vectors, pods, track, tick)
//! - `protocol`: Line-oriented text codec for race input and pod commands
//! - `scenario`: Seeded random track and pod generation
//! - `settings`: Data-driven run configuration

pub mod error;
pub mod protocol;
pub mod scenario;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use settings::{PodTuning, Settings};

/// Simulation constants
pub mod consts {
    /// Pod defaults
    pub const POD_MASS: f64 = 1.0;
    pub const POD_RADIUS: f64 = 400.0;
    /// Target speed of the seek controller (advisory, never enforced by integration)
    pub const POD_MAX_SPEED: f64 = 1127.0;
    pub const POD_MAX_THRUST: f64 = 200.0;
    /// Velocity multiplier applied once per tick
    pub const POD_FRICTION: f64 = 0.85;

    /// Arrival radius shared by every generated checkpoint
    pub const CHECKPOINT_RADIUS: f64 = 600.0;

    /// Displacement multiplier (1.0 = real time)
    pub const TIME_FACTOR: f64 = 1.0;

    /// Rectangle checkpoints are generated in
    pub const CHECKPOINT_AREA_MIN: (f64, f64) = (1200.0, 1200.0);
    pub const CHECKPOINT_AREA_MAX: (f64, f64) = (14000.0, 7800.0);

    /// Square pods are spawned in
    pub const POD_SPAWN_MIN: f64 = 0.0;
    pub const POD_SPAWN_MAX: f64 = 100.0;

    /// Race map dimensions, used for edge bouncing
    pub const MAP_WIDTH: f64 = 16000.0;
    pub const MAP_HEIGHT: f64 = 9000.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f64) -> f64 {
    use std::f64::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Round half toward +∞, the way race protocol integers are reported
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(3.0 * PI) - (-PI)).abs() < 1e-9);
        assert!((normalize_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-9);
        assert_eq!(normalize_angle(0.5), 0.5);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(484.4), 484.0);
    }
}
