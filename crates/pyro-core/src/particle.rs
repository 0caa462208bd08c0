//! The smallest simulated unit: sparks, trail dots, smoke puffs and the dragon head.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::{Bounds, PIXEL_SIZE};

/// Cascade marker checked by the owner when a particle dies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubBurst {
    #[default]
    None,
    Simple,
    MegaStage1,
    MegaStage2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "behavior", rename_all = "snake_case")]
pub enum Behavior {
    /// Friction, gravity, straight integration.
    Normal,
    /// Self-steering head that lays down a glowing body behind it.
    DragonHead { heading: f32, wobble: f32 },
}

impl Behavior {
    pub fn label(self) -> &'static str {
        match self {
            Behavior::Normal => "normal",
            Behavior::DragonHead { .. } => "dragon_head",
        }
    }
}

const DRAGON_SPEED: f32 = 8.0;
const DRAGON_MARGIN: f32 = 100.0;
const DRAGON_FLOOR_MARGIN: f32 = 150.0;
const DRAGON_STEER: f32 = 0.05;
const DRAGON_BODY_LIFE: i32 = 50;
pub const DRAGON_HEAD_LIFE: i32 = 300;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining frames. Dead at or below zero.
    pub life: i32,
    pub max_life: i32,
    pub color: Color,
    /// Edge length in scene units.
    pub size: f32,
    pub gravity: f32,
    pub friction: f32,
    pub flicker: bool,
    pub smoke: bool,
    pub behavior: Behavior,
    pub sub_burst: SubBurst,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, life: i32, color: Color) -> Self {
        Self {
            pos,
            vel,
            life,
            max_life: life,
            color,
            size: PIXEL_SIZE,
            gravity: 0.05,
            friction: 0.95,
            flicker: false,
            smoke: false,
            behavior: Behavior::Normal,
            sub_burst: SubBurst::None,
        }
    }

    /// Size as a multiple of [`PIXEL_SIZE`].
    pub fn sized(mut self, multiplier: f32) -> Self {
        self.size = PIXEL_SIZE * multiplier;
        self
    }

    pub fn physics(mut self, gravity: f32, friction: f32) -> Self {
        self.gravity = gravity;
        self.friction = friction;
        self
    }

    pub fn flickering(mut self, flicker: bool) -> Self {
        self.flicker = flicker && !self.smoke;
        self
    }

    pub fn with_sub_burst(mut self, marker: SubBurst) -> Self {
        self.sub_burst = marker;
        self
    }

    pub fn as_smoke(mut self) -> Self {
        self.smoke = true;
        self.flicker = false;
        self
    }

    /// A dragon head pointing straight up.
    pub fn dragon_head(pos: Vec2) -> Self {
        let mut head = Particle::new(pos, Vec2::ZERO, DRAGON_HEAD_LIFE, Color::GOLD)
            .sized(2.0)
            .physics(0.0, 1.0);
        head.behavior = Behavior::DragonHead {
            heading: -std::f32::consts::FRAC_PI_2,
            wobble: 0.0,
        };
        head
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0
    }

    pub fn heading(&self) -> Option<f32> {
        match self.behavior {
            Behavior::DragonHead { heading, .. } => Some(heading),
            Behavior::Normal => None,
        }
    }

    /// Fade factor for smoke, 1.0 for everything else.
    pub fn opacity(&self) -> f32 {
        if self.smoke && self.max_life > 0 {
            (self.life as f32 / self.max_life as f32).max(0.0)
        } else {
            1.0
        }
    }

    /// Integrate one frame. Dragon heads push one body segment into `sink`.
    pub fn advance(
        &mut self,
        bounds: Bounds,
        elapsed_ms: f64,
        rng: &mut impl Rng,
        sink: &mut Vec<Particle>,
    ) {
        match self.behavior {
            Behavior::Normal => {
                self.vel *= self.friction;
                self.vel.y += self.gravity;
                self.pos += self.vel;
                self.life -= 1;
            }
            Behavior::DragonHead { heading, wobble } => {
                self.life -= 1;
                let (heading, wobble) = self.steer_dragon(heading, wobble, bounds, rng);
                self.behavior = Behavior::DragonHead { heading, wobble };
                sink.push(self.dragon_segment(elapsed_ms, rng));
            }
        }
    }

    fn steer_dragon(
        &mut self,
        mut heading: f32,
        mut wobble: f32,
        bounds: Bounds,
        rng: &mut impl Rng,
    ) -> (f32, f32) {
        wobble += 0.2;
        heading += wobble.sin() * 0.15 + (rng.gen::<f32>() - 0.5) * 0.1;

        if self.pos.x < DRAGON_MARGIN {
            heading += DRAGON_STEER;
        }
        if self.pos.x > bounds.width - DRAGON_MARGIN {
            heading -= DRAGON_STEER;
        }
        if self.pos.y < DRAGON_MARGIN {
            heading += DRAGON_STEER;
        }
        if self.pos.y > bounds.height - DRAGON_FLOOR_MARGIN {
            heading -= DRAGON_STEER;
        }

        self.vel = Vec2::new(heading.cos(), heading.sin()) * DRAGON_SPEED;
        self.pos += self.vel;

        if self.pos.x < 0.0 || self.pos.x > bounds.width {
            self.vel.x = -self.vel.x;
            self.pos.x = self.pos.x.clamp(0.0, bounds.width);
            heading = self.vel.y.atan2(self.vel.x);
        }
        if self.pos.y < 0.0 || self.pos.y > bounds.height {
            self.vel.y = -self.vel.y;
            self.pos.y = self.pos.y.clamp(0.0, bounds.height);
            heading = self.vel.y.atan2(self.vel.x);
        }
        (heading, wobble)
    }

    fn dragon_segment(&self, elapsed_ms: f64, rng: &mut impl Rng) -> Particle {
        let hue = ((elapsed_ms / 5.0 + self.life as f64 * 2.0) % 360.0) as f32;
        let body = 2.0 + (self.life as f32 * 0.2).sin() * 0.5;
        let color = Color::hsl(hue, 100.0, 50.0);
        Particle::new(self.pos, Vec2::ZERO, DRAGON_BODY_LIFE, color)
            .sized(body)
            .physics(0.0, 0.9)
            .flickering(rng.gen_bool(0.3))
    }
}
