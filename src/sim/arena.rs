//! Rectangular arena with naive edge bouncing
//!
//! Auxiliary mode: pods are not collided with each other, only kept inside
//! `[radius, extent - radius]` on each axis.

use serde::{Deserialize, Serialize};

use super::pod::Pod;
use crate::consts::{MAP_HEIGHT, MAP_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
        }
    }
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamp the pod back inside and flip the offending velocity component.
    /// Returns true if either axis bounced.
    pub fn bounce(&self, pod: &mut Pod) -> bool {
        let r = pod.radius();
        let mut bounced = false;

        let x = pod.position.x();
        let clamped_x = if x > self.width - r {
            Some(self.width - r)
        } else if x < r {
            Some(r)
        } else {
            None
        };
        if let Some(x) = clamped_x {
            pod.position = pod.position.with_x(x);
            pod.velocity = pod.velocity.with_x(-pod.velocity.x());
            bounced = true;
        }

        let y = pod.position.y();
        let clamped_y = if y > self.height - r {
            Some(self.height - r)
        } else if y < r {
            Some(r)
        } else {
            None
        };
        if let Some(y) = clamped_y {
            pod.position = pod.position.with_y(y);
            pod.velocity = pod.velocity.with_y(-pod.velocity.y());
            bounced = true;
        }

        bounced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::vector::Vector2D;

    #[test]
    fn test_bounce_off_right_wall() {
        let arena = Arena::new(10000.0, 10000.0);
        let mut pod = Pod::new(
            Vector2D::new(9800.0, 5000.0),
            Vector2D::new(150.0, 20.0),
            Vector2D::ZERO,
            0.0,
        );
        assert!(arena.bounce(&mut pod));
        assert_eq!(pod.position(), Vector2D::new(9600.0, 5000.0));
        assert_eq!(pod.velocity(), Vector2D::new(-150.0, 20.0));
    }

    #[test]
    fn test_bounce_corner_flips_both_axes() {
        let arena = Arena::default();
        let mut pod = Pod::new(
            Vector2D::new(10.0, 50.0),
            Vector2D::new(-30.0, -40.0),
            Vector2D::ZERO,
            0.0,
        );
        assert!(arena.bounce(&mut pod));
        assert_eq!(pod.position(), Vector2D::new(400.0, 400.0));
        assert_eq!(pod.velocity(), Vector2D::new(30.0, 40.0));
    }

    #[test]
    fn test_inside_is_untouched() {
        let arena = Arena::default();
        let mut pod = Pod::new(
            Vector2D::new(8000.0, 4500.0),
            Vector2D::new(-30.0, -40.0),
            Vector2D::ZERO,
            0.0,
        );
        assert!(!arena.bounce(&mut pod));
        assert_eq!(pod.velocity(), Vector2D::new(-30.0, -40.0));
    }
}
