//! Deterministic simulation module
//!
//! The steering and physics kernel. This module must stay pure:
//! - One discrete step per tick, no wall-clock time
//! - No I/O, rendering or platform dependencies
//! - Stable iteration order (by pod id)

pub mod arena;
pub mod pod;
pub mod state;
pub mod steering;
pub mod tick;
pub mod track;
pub mod vector;

pub use arena::Arena;
pub use pod::Pod;
pub use state::{Racer, Simulation};
pub use steering::{Behavior, follow, follow_force, seek, seek_force};
pub use tick::{SimEvent, tick};
pub use track::{Checkpoint, Track};
pub use vector::Vector2D;
