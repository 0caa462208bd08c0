//! Pyro core engine: platform-agnostic simulation of fireworks, particles and the watcher.

pub mod color;
pub mod config;
pub mod error;
pub mod firework;
pub mod frame;
pub mod particle;
pub mod render;
pub mod scene;
pub mod sub_burst;
pub mod watcher;

use serde::{Deserialize, Serialize};

pub use color::Color;
pub use config::SceneConfig;
pub use error::{ConfigError, UnknownKind};
pub use firework::{Firework, FireworkKind};
pub use particle::Particle;
pub use render::{FrameSnapshot, ParticleVertex};
pub use scene::{MoonHit, Scene, SceneEvent};
pub use watcher::{Watcher, WatcherState};

/// Edge length of one art pixel, in scene units.
pub const PIXEL_SIZE: f32 = 4.0;
/// The ground line sits this far above the bottom edge.
pub const GROUND_OFFSET: f32 = 10.0;

/// Scene size in scene units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero-sized or non-finite bounds mean the host has not laid out yet.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn ground_y(&self) -> f32 {
        self.height - GROUND_OFFSET
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_validity() {
        assert!(Bounds::new(800.0, 600.0).is_valid());
        assert!(!Bounds::default().is_valid());
        assert!(!Bounds::new(800.0, 0.0).is_valid());
        assert!(!Bounds::new(f32::NAN, 600.0).is_valid());
    }

    #[test]
    fn ground_sits_above_bottom_edge() {
        assert_eq!(Bounds::new(800.0, 600.0).ground_y(), 590.0);
    }
}
