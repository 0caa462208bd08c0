//! Per-tick context handed to entities, and the outbox they write into.
//!
//! Entities never touch the scene's live collections while it is being
//! iterated. Everything they want to add, play or trigger lands in an
//! [`Effects`] outbox that the scene drains once the pass is over, so fresh
//! entities are first advanced on the following tick.

use glam::Vec2;
use pyro_platform::SoundCue;

use crate::config::Footprint;
use crate::firework::Firework;
use crate::particle::Particle;
use crate::Bounds;

#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    pub bounds: Bounds,
    /// Simulated milliseconds since the session started.
    pub elapsed_ms: f64,
    /// Ground-level area in front of the shelter that upsets the neighbors.
    pub footprint: Footprint,
    /// Chance that one small pop inside the footprint upsets them.
    pub mini_chance: f32,
}

impl FrameContext {
    pub fn in_footprint(&self, pos: Vec2) -> bool {
        self.footprint.contains(pos, self.bounds)
    }
}

#[derive(Debug, Default)]
pub struct Effects {
    pub particles: Vec<Particle>,
    pub fireworks: Vec<Firework>,
    pub cues: Vec<SoundCue>,
    /// Set when something asked for the angry-neighbor disturbance.
    pub disturbance: bool,
    /// Longest shake requested this tick, in frames.
    pub shake: u32,
}

impl Effects {
    pub fn play(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }

    pub fn disturb(&mut self) {
        self.disturbance = true;
    }

    pub fn shake(&mut self, frames: u32) {
        self.shake = self.shake.max(frames);
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
            && self.fireworks.is_empty()
            && self.cues.is_empty()
            && !self.disturbance
            && self.shake == 0
    }
}
