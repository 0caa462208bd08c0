//! Multi-shot ground batteries: the arc fan and the fountain.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6};

use glam::Vec2;
use rand::Rng;

use super::blast::{between, polar, SHELL_LAUNCH};
use super::Firework;
use crate::color::Color;
use crate::frame::Effects;
use crate::particle::Particle;

/// Shells are fired this far above the battery.
const MUZZLE: f32 = 10.0;
/// Shells burst at the latest this far above the battery.
const SHELL_CEILING: f32 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aim {
    /// Shots are spread evenly across `spread` radians, first to last.
    Fan { spread: f32 },
    /// Nearly vertical, with a spark spray between shots.
    Narrow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Battery {
    pub total: u32,
    pub remaining: u32,
    delay: i32,
    interval: i32,
    aim: Aim,
}

impl Battery {
    pub fn arc(rng: &mut impl Rng) -> Self {
        let total = rng.gen_range(4..=7);
        Self {
            total,
            remaining: total,
            delay: 0,
            interval: 12,
            aim: Aim::Fan {
                spread: FRAC_PI_6 + between(rng, 0.0, FRAC_PI_4),
            },
        }
    }

    pub fn fountain(rng: &mut impl Rng) -> Self {
        let total = rng.gen_range(5..=7);
        Self {
            total,
            remaining: total,
            delay: 0,
            interval: 25,
            aim: Aim::Narrow,
        }
    }

    pub fn aim(&self) -> Aim {
        self.aim
    }

    pub fn is_spent(&self) -> bool {
        self.remaining == 0
    }

    /// Count down and fire the next shell once the delay has run out.
    pub fn tick(&mut self, origin: Vec2, hue: f32, rng: &mut impl Rng, fx: &mut Effects) {
        if self.is_spent() {
            return;
        }
        self.delay -= 1;
        if self.aim == Aim::Narrow && rng.gen_bool(0.5) {
            fx.particles.push(spray(origin, rng));
        }
        if self.delay > 0 {
            return;
        }

        let (vel, shell_hue) = match self.aim {
            Aim::Fan { spread } => {
                let index = self.total - self.remaining;
                let fraction = if self.total > 1 {
                    index as f32 / (self.total - 1) as f32
                } else {
                    0.5
                };
                let angle = -FRAC_PI_2 + (fraction - 0.5) * spread;
                let power = between(rng, 13.0, 16.0);
                (Vec2::new(angle.cos() * power * 0.4, angle.sin() * power), hue)
            }
            Aim::Narrow => {
                let angle = -FRAC_PI_2 + (rng.gen::<f32>() - 0.5) * 0.15;
                let power = between(rng, 14.0, 16.0);
                let hue = rng.gen_range(0.0..360.0);
                (Vec2::new(angle.cos() * power * 0.1, angle.sin() * power), hue)
            }
        };

        let muzzle = origin - Vec2::new(0.0, MUZZLE);
        let ceiling = origin.y - SHELL_CEILING;
        fx.fireworks.push(Firework::shell(muzzle, vel, ceiling, shell_hue));
        fx.play(SHELL_LAUNCH);
        self.remaining -= 1;
        self.delay = self.interval;
    }
}

fn spray(origin: Vec2, rng: &mut impl Rng) -> Particle {
    let angle = -FRAC_PI_2 + (rng.gen::<f32>() - 0.5) * 0.5;
    let speed = between(rng, 2.0, 7.0);
    let vel = polar(angle, speed) * Vec2::new(0.5, 1.0);
    let muzzle = origin - Vec2::new(0.0, MUZZLE);
    Particle::new(muzzle, vel, 20, Color::rgb(0xff, 0xaa, 0x00))
        .sized(0.5)
        .flickering(rng.gen_bool(0.2))
}
